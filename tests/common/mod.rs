use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Generate a unique suffix based on timestamp to avoid collisions between tests.
pub fn unique_suffix() -> String {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}", ts % 1_000_000_000)
}

/// A fresh path in the system temp directory. The file is not created.
pub fn temp_pgn(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("pinata-{name}-{}.pgn", unique_suffix()))
}

/// Write `contents` to a fresh temp file and return its path.
pub fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = temp_pgn(name);
    std::fs::write(&path, contents).unwrap();
    path
}
