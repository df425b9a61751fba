//! Example demonstrating custom setters and JSON values

use std::collections::HashMap;
use std::net::SocketAddr;
use tagconf::{Json, Setter, TagConf};

// A type that parses itself from the raw value
#[derive(Debug, Default)]
struct Upstreams(Vec<SocketAddr>);

impl Setter for Upstreams {
    fn set_from_str(&mut self, raw: &str) -> anyhow::Result<()> {
        for addr in raw.split(',') {
            self.0.push(addr.trim().parse()?);
        }
        Ok(())
    }
}

#[derive(Debug, Default, TagConf)]
struct Config {
    #[conf(env = "UPSTREAMS", default = "127.0.0.1:8001, 127.0.0.1:8002")]
    pub upstreams: Upstreams,

    // Only allocated when a value resolves
    #[conf(env = "FALLBACK")]
    pub fallback: Option<Upstreams>,

    // Structured values have no delimited form: read them as JSON
    #[conf(env = "LABELS", default = "{}")]
    pub labels: Json<HashMap<String, String>>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("LABELS", r#"{"region":"eu-west-1","tier":"web"}"#);

    let config: Config = tagconf::load()?;

    println!("Configuration loaded:");
    println!("  Upstreams: {:?}", config.upstreams.0);
    println!("  Fallback: {:?}", config.fallback);
    println!("  Labels: {:?}", config.labels);

    Ok(())
}
