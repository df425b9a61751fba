//! Basic example: required values, defaults and durations

use std::time::Duration;
use tagconf::TagConf;

#[derive(Debug, Default, TagConf)]
struct Config {
    // Fails if DATABASE_URL is missing or empty
    #[conf(env = "DATABASE_URL", required = true)]
    pub database_url: String,

    // Falls back to the default when PORT is unset
    #[conf(env = "PORT", default = 8080)]
    pub port: u16,

    #[conf(env = "REQUEST_TIMEOUT", default = "1m30s")]
    pub request_timeout: Duration,

    // Optional: stays false when DEBUG is unset
    #[conf(env = "DEBUG")]
    pub debug: bool,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("DEBUG", "true");

    let config: Config = tagconf::load()?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Port: {}", config.port);
    println!("  Request timeout: {}", tagconf::format_duration(config.request_timeout));
    println!("  Debug: {}", config.debug);

    Ok(())
}
