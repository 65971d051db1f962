//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Version banner shown by the simulator, e.g.
/// `hypers-drive 0.1.0 (abc1234, 2026-10-19)`. Non-release builds append
/// the profile name.
pub fn version_banner() -> String {
    let mut banner = format!(
        "hypers-drive {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_COMMIT,
        BUILD_DATE
    );
    if BUILD_PROFILE != "release" {
        banner.push_str(&format!(" [{BUILD_PROFILE}]"));
    }
    banner
}
