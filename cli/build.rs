//! Build script: embeds the resbundle version string at compile time.

use std::process::Command;

fn main() {
    // Prefer RESBUNDLE_VERSION env var if set (e.g., by a release build),
    // otherwise fall back to git describe for local development builds.
    if let Ok(version) = std::env::var("RESBUNDLE_VERSION") {
        println!("cargo:rustc-env=RESBUNDLE_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=RESBUNDLE_VERSION={version}");
    }

    // Re-run if git HEAD changes or env var changes
    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-changed=../.git/refs/");
    println!("cargo:rerun-if-env-changed=RESBUNDLE_VERSION");
}
