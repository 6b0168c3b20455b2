use std::fs;

fn main() {
    // Validate the bundled page config at compile time
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");

    if let Err(e) = content.parse::<toml::Table>() {
        panic!("Invalid default_config.toml: {}", e);
    }
}
