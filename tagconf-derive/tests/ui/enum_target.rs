use tagconf::TagConf;

#[allow(dead_code)]
#[derive(TagConf)]
enum Mode {
    Fast,
}

fn main() {}
