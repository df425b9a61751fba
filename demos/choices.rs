//! Example demonstrating `choices` validation

use tagconf::{Error, TagConf};

#[derive(Debug, Default, TagConf)]
struct Config {
    #[conf(env = "LOG_LEVEL", default = "info", choices = "debug,info,warn,error")]
    pub log_level: String,

    // Every listed feature must be one of the choices
    #[conf(env = "FEATURES", choices = "auth|cache|metrics", delimiter = "|")]
    pub features: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("FEATURES", "auth|metrics");

    let config: Config = tagconf::load()?;
    println!("Log level: {}", config.log_level);
    println!("Features: {:?}", config.features);

    std::env::set_var("LOG_LEVEL", "verbose");
    match tagconf::load::<Config>() {
        Err(e @ Error::InvalidChoice { .. }) => println!("Rejected: {e}"),
        other => println!("Unexpected result: {other:?}"),
    }

    Ok(())
}
