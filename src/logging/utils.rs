//! Log file location, ANSI stripping and timestamps.
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

/// Strip CSI escape sequences (colours, cursor movement) and lone escapes.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        if chars.next() == Some('[') {
            // Parameters run until the final byte in `@`..=`~`.
            for inner in chars.by_ref() {
                if ('@'..='~').contains(&inner) {
                    break;
                }
            }
        }
    }
    out
}

/// Base cache directory: `$XDG_CACHE_HOME`, else `<home>/.cache`, else `.`.
pub(super) fn cache_base(xdg_cache_home: Option<OsString>, home: Option<PathBuf>) -> PathBuf {
    match xdg_cache_home.filter(|dir| !dir.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => home.map_or_else(|| PathBuf::from("."), |home| home.join(".cache")),
    }
}

/// Return `<cache>/dotlink/`, creating it if needed.
fn dotlink_cache_dir() -> Option<PathBuf> {
    let dir = cache_base(std::env::var_os("XDG_CACHE_HOME"), dirs::home_dir()).join("dotlink");
    fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Log file for `command` under the dotlink cache directory.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    Some(dotlink_cache_dir()?.join(format!("{command}.log")))
}

/// Current UTC time as `YYYY-MM-DD HH:MM:SS`.
pub(super) fn format_utc_datetime() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Current UTC time as `HH:MM:SS`.
pub(super) fn format_utc_time() -> String {
    chrono::Utc::now().format("%H:%M:%S").to_string()
}
