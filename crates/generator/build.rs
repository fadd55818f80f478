//! Places the workspace config.toml next to the mdm-gen binary, where
//! `load_config` looks for it when no path is given on the command line.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let workspace_config = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config.toml");
    if !workspace_config.exists() {
        println!("cargo:warning=No workspace config.toml, mdm-gen falls back to its embedded config");
        return;
    }

    let Some(bin_dir) = binary_dir() else {
        println!("cargo:warning=Could not locate the mdm-gen output directory, config.toml not copied");
        return;
    };

    let dest = bin_dir.join("config.toml");
    if let Err(e) = fs::copy(&workspace_config, &dest) {
        panic!("Failed to copy config.toml to {}: {}", dest.display(), e);
    }
}

/// `target/<profile>`, the first ancestor of OUT_DIR named after the profile
fn binary_dir() -> Option<PathBuf> {
    let out_dir = PathBuf::from(env::var_os("OUT_DIR")?);
    let profile = env::var("PROFILE").ok()?;
    out_dir
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}
