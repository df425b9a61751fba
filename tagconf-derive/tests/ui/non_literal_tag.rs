use tagconf::TagConf;

#[allow(dead_code)]
#[derive(TagConf)]
struct Config {
    #[conf(env = PORT)]
    port: u16,
}

fn main() {}
