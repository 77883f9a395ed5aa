//! Platform helpers
//!
//! The release bundle may ship an ffmpeg binary in `bin/` next to the
//! executable. Audio tooling spawned by this process finds it through PATH.

use log::{debug, info};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[cfg(windows)]
const FFMPEG_NAME: &str = "ffmpeg.exe";
#[cfg(not(windows))]
const FFMPEG_NAME: &str = "ffmpeg";

/// Location of the bundled ffmpeg relative to a base directory
pub fn bundled_ffmpeg_path(base: &Path) -> PathBuf {
    base.join("bin").join(FFMPEG_NAME)
}

/// Prepend the bundled ffmpeg directory to PATH when the helper exists
///
/// Looks next to the running executable. Returns the helper path if it
/// was found. Absence is not an error.
pub fn expose_bundled_ffmpeg() -> Option<PathBuf> {
    let base = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))?;
    expose_bundled_ffmpeg_in(&base)
}

/// Prepend `base/bin` to PATH when it holds an ffmpeg binary
pub fn expose_bundled_ffmpeg_in(base: &Path) -> Option<PathBuf> {
    let ffmpeg = bundled_ffmpeg_path(base);
    if !ffmpeg.is_file() {
        debug!("No bundled ffmpeg at {:?}", ffmpeg);
        return None;
    }

    let dir = ffmpeg.parent()?.to_path_buf();
    let current = env::var_os("PATH").unwrap_or_default();
    match prepend_to_search_path(&dir, &current) {
        Some(path) => {
            env::set_var("PATH", path);
            info!("Bundled ffmpeg exposed on PATH: {:?}", ffmpeg);
            Some(ffmpeg)
        }
        None => {
            debug!("Could not join {:?} into PATH", dir);
            None
        }
    }
}

/// Build a search path with `dir` in front of `current`
fn prepend_to_search_path(dir: &Path, current: &OsString) -> Option<OsString> {
    let mut entries = vec![dir.to_path_buf()];
    entries.extend(env::split_paths(current));
    env::join_paths(entries).ok()
}
