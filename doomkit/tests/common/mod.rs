//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::time::Duration;

use doomkit::config::AssetConfig;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Build an in-memory ZIP archive. Names ending in `/` become directories.
pub fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, data) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options).unwrap();
        } else {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data.as_bytes()).unwrap();
        }
    }
    zip.finish().unwrap().into_inner()
}

/// The layout of the v1.9 shareware zip: everything under one folder.
pub fn shareware_zip() -> Vec<u8> {
    build_zip(&[
        ("DOOMS/", ""),
        ("DOOMS/DOOM.EXE", "exe-bytes"),
        ("DOOMS/DOOM1.WAD", "wad-bytes"),
        ("DOOMS/SETUP.EXE", "setup-bytes"),
        ("DOOMS/README.TXT", "readme"),
        ("DOOMS/FILE_ID.DIZ", "id"),
    ])
}

/// Config pointing at a fresh directory inside `temp`, with short timeouts.
pub fn test_config(temp: &TempDir, sources: &[String]) -> AssetConfig {
    AssetConfig::new(temp.path().join("doom"))
        .with_sources(sources.iter().cloned())
        .with_connect_timeout(Duration::from_secs(2))
        .with_attempt_timeout(Duration::from_secs(5))
        .with_total_timeout(Duration::from_secs(20))
}
