//! Build script for TDC firmware
//!
//! Handles:
//! - Linker scripts for the embedded binary (cortex-m-rt, defmt)
//! - Nothing for host test builds

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host test builds link normally
    if std::env::var_os("CARGO_FEATURE_EMBEDDED").is_none() {
        return;
    }

    // memory.x is provided by embassy-stm32's `memory-x` feature
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
