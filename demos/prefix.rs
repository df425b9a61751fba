//! Example demonstrating prefix usage

use tagconf::TagConf;

#[derive(Debug, Default, TagConf)]
#[conf(prefix = "MYAPP_")]
struct Config {
    #[conf(env = "DATABASE_URL", required = true)]
    pub database_url: String, // reads MYAPP_DATABASE_URL

    #[conf(env = "PORT", default = 3000)]
    pub port: u16, // reads MYAPP_PORT
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("MYAPP_DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("MYAPP_PORT", "4000");

    let config: Config = tagconf::load()?;

    println!("Configuration loaded with prefix MYAPP_:");
    println!("  Database URL: {}", config.database_url);
    println!("  Port: {}", config.port);

    Ok(())
}
