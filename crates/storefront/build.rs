//! Build script for storefront crate.
//!
//! Derives a cache-busting version from the content of the static assets the
//! layout links to.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Assets whose content determines `ASSET_VERSION`.
const VERSIONED_ASSETS: [&str; 2] = ["static/css/main.css", "static/js/site.js"];

fn main() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");

    let mut hasher = Sha256::new();
    for asset in VERSIONED_ASSETS {
        let path = Path::new(&manifest_dir).join(asset);
        println!("cargo:rerun-if-changed={}", path.display());

        match fs::read(&path) {
            Ok(content) => hasher.update(&content),
            Err(e) => println!("cargo:warning=Could not read {asset}: {e}"),
        }
    }

    let hash = format!("{:x}", hasher.finalize());
    let short_hash = hash.get(..8).unwrap_or(&hash);
    println!("cargo:rustc-env=ASSET_VERSION={short_hash}");
}
