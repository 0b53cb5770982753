//! Build script for aerofuzz
//!
//! Embeds version and target information for the CLI.

use std::env;

fn main() {
    println!("cargo:rerun-if-changed=src/main.rs");
    println!("cargo:rerun-if-changed=build.rs");

    // Set version for embedding
    if let Ok(version) = env::var("CARGO_PKG_VERSION") {
        println!("cargo:rustc-env=AEROFUZZ_VERSION={}", version);
    }

    // Emit target info
    if let Ok(target) = env::var("TARGET") {
        println!("cargo:rustc-env=AEROFUZZ_TARGET={}", target);
    }
}
