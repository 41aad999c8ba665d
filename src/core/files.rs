//! File system helpers

use std::{
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};

/// Directory for local artifacts: `~/.cache/espn-flb-stats`.
pub fn data_dir() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join("espn-flb-stats")
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write bytes to a file, creating parent directories as needed
pub fn write_bytes(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents)
}
