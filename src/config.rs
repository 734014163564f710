use std::path::{Path, PathBuf};

pub const LIBRARY_PATH_ENV: &str = "ALBUM_CATALOG_PATH";
pub const DEFAULT_LIBRARY_PATH: &str = "albums.json";

/// Where the library document lives: the `--library` flag, then
/// `ALBUM_CATALOG_PATH`, then `./albums.json`.
pub fn library_path(arg: Option<&Path>) -> PathBuf {
    resolve_library_path(arg, std::env::var(LIBRARY_PATH_ENV).ok())
}

fn resolve_library_path(arg: Option<&Path>, env: Option<String>) -> PathBuf {
    arg.map(Path::to_path_buf)
        .or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LIBRARY_PATH))
}

pub fn log_level(verbose: bool) -> log::LevelFilter {
    if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}
