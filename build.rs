//! Build script for chowplan
//!
//! Embeds the compile time, cargo profile and target triple so the status
//! tool can report exactly which binary is serving plans.

use std::env;

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=build.rs");

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());
    let target = env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=CHOWPLAN_BUILD_TIMESTAMP={}", timestamp);
    println!("cargo:rustc-env=CHOWPLAN_BUILD_PROFILE={}", profile);
    println!("cargo:rustc-env=CHOWPLAN_BUILD_TARGET={}", target);
}
