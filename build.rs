use cargo_lock::Lockfile;
use serde::Serialize;
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

#[derive(Serialize)]
struct DepInfo {
    name: String,
    version: String,
    checksum: Option<String>,
    source: Option<String>,
}

fn main() {
    // Commit the binary was built from
    let output = Command::new("git").args(["rev-parse", "HEAD"]).output();
    let git_hash = match output {
        Ok(o) if o.status.success() => {
            String::from_utf8_lossy(&o.stdout).trim().to_string()
        }
        _ => "unknown".to_string(),
    };
    println!("cargo:rustc-env=ROWSPACING_GIT_HASH={}", git_hash);
    println!("cargo:rerun-if-changed=.git/HEAD");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo");
    let lock_path = Path::new(&manifest_dir).join("Cargo.lock");
    println!("cargo:rerun-if-changed=Cargo.lock");

    // A missing lock file only means an empty dependency listing
    let deps: Vec<DepInfo> = match Lockfile::load(&lock_path) {
        Ok(lockfile) => lockfile
            .packages
            .into_iter()
            .map(|pkg| DepInfo {
                name: pkg.name.as_str().to_string(),
                version: pkg.version.to_string(),
                checksum: pkg.checksum.map(|c| c.to_string()),
                source: pkg.source.map(|s| s.to_string()),
            })
            .collect(),
        Err(_) => Vec::new(),
    };
    let json_info = serde_json::to_string(&deps).expect("Failed to serialize deps");

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let dest_path = Path::new(&out_dir).join("deps_info.json");
    fs::write(&dest_path, json_info).expect("Failed to write dependency info");
    println!("cargo:rustc-env=ROWSPACING_DEPS_INFO_PATH={}", dest_path.display());
}
