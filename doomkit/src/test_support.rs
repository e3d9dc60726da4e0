//! Shared fixtures for unit tests.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Build an in-memory ZIP archive. Names ending in `/` become directories.
pub fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
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

/// A typical shareware archive: executable, data, setup and noise.
pub fn shareware_zip() -> Vec<u8> {
    build_zip(&[
        ("DOOMS/", ""),
        ("DOOMS/DOOM.EXE", "exe-bytes"),
        ("DOOMS/DOOM1.WAD", "wad-bytes"),
        ("DOOMS/SETUP.EXE", "setup-bytes"),
        ("DOOMS/README.TXT", "readme"),
    ])
}
