//! Embeds the commit, build date and cargo profile into `build_info.rs`.

use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn git_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    let hash = hash.trim();
    (!hash.is_empty()).then(|| hash.to_string())
}

fn build_date() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

fn main() -> Result<(), Box<dyn Error>> {
    let commit = env::var("BUILD_COMMIT")
        .ok()
        .or_else(git_commit)
        .unwrap_or_else(|| "unknown".to_string());
    let date = env::var("BUILD_DATE").unwrap_or_else(|_| build_date());
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    let consts = [
        ("BUILD_COMMIT", commit),
        ("BUILD_DATE", date),
        ("BUILD_PROFILE", profile),
    ]
    .iter()
    .map(|(name, value)| format!("pub const {name}: &str = {value:?};\n"))
    .collect::<String>();

    let dest = PathBuf::from(env::var("OUT_DIR")?).join("build_info.rs");
    fs::write(dest, consts)?;

    for var in ["BUILD_COMMIT", "BUILD_DATE"] {
        println!("cargo:rerun-if-env-changed={var}");
    }
    println!("cargo:rerun-if-changed=.git/HEAD");
    Ok(())
}
