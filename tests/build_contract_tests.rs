//! Packaging checks: the favicon is shipped and copied to the site root

use std::fs;
use std::path::PathBuf;

fn manifest_path(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(rel)
}

#[test]
fn test_favicon_source_exists() {
    let bytes = fs::read(manifest_path("public/favicon.ico")).expect("favicon should exist");
    // ICO header: reserved 0, type 1
    assert!(bytes.len() > 6);
    assert_eq!(&bytes[..4], &[0, 0, 1, 0]);
}

#[test]
fn test_index_copies_favicon_to_root() {
    let index = fs::read_to_string(manifest_path("index.html")).expect("index.html should exist");
    assert!(index.contains(r#"<link data-trunk rel="copy-file" href="public/favicon.ico" />"#));
    assert!(index.contains(r#"<link rel="icon" href="/favicon.ico" />"#));
}

#[test]
fn test_site_is_published_at_root() {
    let trunk = fs::read_to_string(manifest_path("Trunk.toml")).expect("Trunk.toml should exist");
    assert!(trunk.contains(r#"public_url = "/""#));
}
