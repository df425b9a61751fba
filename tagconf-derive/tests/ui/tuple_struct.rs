use tagconf::TagConf;

#[allow(dead_code)]
#[derive(TagConf)]
struct Config(String);

fn main() {}
