use std::fs;

const CONFIG_PATH: &str = "src/default_config.toml";

fn main() {
    println!("cargo:rerun-if-changed={CONFIG_PATH}");

    let content = fs::read_to_string(CONFIG_PATH).expect("Failed to read default_config.toml");
    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {e}"),
    };

    // The bundled config must deserialize without falling back to defaults.
    let policy = table
        .get("title")
        .and_then(|title| title.get("policy"))
        .and_then(|policy| policy.as_str());
    if let Some(policy) = policy {
        assert!(
            matches!(policy, "first" | "last"),
            "default_config.toml: unknown title policy {policy:?}"
        );
    }
}
