//! Example demonstrating list values and delimiters

use std::time::Duration;
use tagconf::TagConf;

#[derive(Debug, Default, TagConf)]
struct Config {
    // Comma separated by default
    #[conf(env = "ALLOWED_PORTS", default = "80,443")]
    pub allowed_ports: Vec<u16>,

    #[conf(env = "PEERS", delimiter = " ")]
    pub peers: Vec<String>,

    #[conf(env = "RETRY_BACKOFF", default = "100ms;1s;5s", delimiter = ";")]
    pub retry_backoff: Vec<Duration>,

    // Vec<u8> is the raw bytes of the value, not a list
    #[conf(env = "SIGNING_SALT", default = "pepper")]
    pub signing_salt: Vec<u8>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("PEERS", "node-a node-b node-c");

    let config: Config = tagconf::load()?;

    println!("Configuration loaded:");
    println!("  Allowed ports: {:?}", config.allowed_ports);
    println!("  Peers: {:?}", config.peers);
    println!("  Retry backoff: {:?}", config.retry_backoff);
    println!("  Signing salt: {} bytes", config.signing_salt.len());

    Ok(())
}
