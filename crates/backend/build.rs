use std::env;
use std::fs;
use std::path::Path;

/// Copies the workspace `config.toml` next to the backend binary so
/// `shared::config::load_config` finds it at run time.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let (Ok(out_dir), Ok(profile)) = (env::var("OUT_DIR"), env::var("PROFILE")) else {
        println!("cargo:warning=OUT_DIR/PROFILE not set, config.toml not copied");
        return;
    };

    // OUT_DIR is target/<profile>/build/backend-xxx/out
    let Some(target_dir) = Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
    else {
        println!("cargo:warning=target profile directory not found, config.toml not copied");
        return;
    };

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let source_config = workspace_root.join("config.toml");

    if !source_config.exists() {
        println!(
            "cargo:warning=config.toml not found at {:?}, the embedded default will be used",
            source_config
        );
        return;
    }

    let dest_config = target_dir.join("config.toml");
    if let Err(e) = fs::copy(&source_config, &dest_config) {
        panic!("Failed to copy config.toml to {:?}: {}", dest_config, e);
    }
}
