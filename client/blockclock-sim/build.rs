use std::{env, fs, path::Path};

fn main() {
    // Get the version from an environment variable (or use a default value)
    let version = env::var("VERSION").unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());
    let commit = env::var("COMMIT").unwrap_or_else(|_| "unknown".to_string());

    // Generate a file holding the version constants
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("version.rs");
    fs::write(
        dest_path,
        format!(
            r#"pub const APP_VERSION: &str = "{}";
pub const APP_LONG_VERSION: &str = "version: {}\ncommit: {}";"#,
            version, version, commit
        ),
    )
    .unwrap();

    println!("cargo:rerun-if-env-changed=VERSION");
    println!("cargo:rerun-if-env-changed=COMMIT");
}
