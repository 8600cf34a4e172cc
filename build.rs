//! Build script for Parley UI
//!
//! Trunk copies `public/favicon.ico` to the published root (see the
//! `copy-file` link in `index.html`). This script makes cargo rebuild when
//! the static assets change and warns early if the favicon is missing.

use std::path::Path;

const FAVICON: &str = "public/favicon.ico";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=index.html");
    println!("cargo:rerun-if-changed={}", FAVICON);
    println!("cargo:rerun-if-env-changed=PARLEY_API_BASE");
    println!("cargo:rerun-if-env-changed=PARLEY_TOKEN_KEY");

    check_favicon();
}

fn check_favicon() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let favicon = Path::new(&manifest_dir).join(FAVICON);

    match std::fs::metadata(&favicon) {
        Ok(meta) if meta.len() > 0 => {}
        Ok(_) => println!("cargo:warning=Parley UI: {} is empty", FAVICON),
        Err(_) => println!(
            "cargo:warning=Parley UI: {} not found, the published site will have no favicon",
            FAVICON
        ),
    }
}
