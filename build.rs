use std::env;
use std::fs;
use std::path::Path;

/// Variables que el adaptador lee con `option_env!` (ver src/config.rs)
const KNOWN_KEYS: &[&str] = &[
    "HERE_API_KEY",
    "HERE_MAP_CONTAINER_ID",
    "HERE_MAP_DEBUG",
    "MAX_SCAN_NODES",
    "MARKER_FOCUS_ZOOM",
    "ROUTE_LINE_WIDTH",
];

fn main() {
    for key in KNOWN_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    // Cargar variables desde .env si existe (sin pisar las del entorno)
    let env_file = Path::new(".env");
    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                let Some((key, value)) = line.split_once('=') else {
                    continue;
                };
                let key = key.trim();
                let value = value.trim().trim_matches('"');

                if !KNOWN_KEYS.contains(&key) {
                    println!("cargo:warning=.env: clave desconocida ignorada: {}", key);
                    continue;
                }
                if value.is_empty() || env::var(key).is_ok() {
                    continue;
                }
                println!("cargo:rustc-env={}={}", key, value);
            }
        }
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env.example");
}
