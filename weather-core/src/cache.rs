//! On-disk cache of raw provider responses.
//!
//! Each provider keeps its last response(s) as pretty-printed JSON at a fixed
//! path. A cached artifact is fresh for [`FRESHNESS_THRESHOLD`] after its
//! modification time.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Result, WeatherError};

pub const FRESHNESS_THRESHOLD: Duration = Duration::from_secs(15 * 60);

/// Decide whether an artifact modified at `mtime` may be reused at `now`.
///
/// A missing artifact is never reused. A modification time in the future
/// (clock skew) counts as fresh.
pub fn may_reuse(mtime: Option<SystemTime>, prefer_cache: bool, now: SystemTime) -> bool {
    let Some(mtime) = mtime else {
        return false;
    };

    let age = now.duration_since(mtime).unwrap_or(Duration::ZERO);
    prefer_cache && age <= FRESHNESS_THRESHOLD
}

/// Modification time of `path`, or `None` if it does not exist.
pub fn modified_at(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Gate over every artifact a provider writes: reuse only if all are fresh.
pub fn may_reuse_all(paths: &[PathBuf], prefer_cache: bool, now: SystemTime) -> bool {
    let reuse = !paths.is_empty()
        && paths.iter().all(|p| may_reuse(modified_at(p), prefer_cache, now));

    debug!(?paths, prefer_cache, reuse, "cache freshness check");
    reuse
}

pub fn read_artifact(path: &Path) -> Result<Value> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(WeatherError::CacheMiss { path: path.to_path_buf() });
        }
        Err(source) => return Err(WeatherError::Io { path: path.to_path_buf(), source }),
    };

    serde_json::from_slice(&bytes)
        .map_err(|source| WeatherError::CacheCorrupt { path: path.to_path_buf(), source })
}

/// Replace the artifact at `path` with `value`, pretty-printed.
///
/// The JSON is written to a temporary file beside `path` and renamed into
/// place, so readers never observe a partial file.
pub fn write_artifact(path: &Path, value: &Value) -> Result<()> {
    let io_err = |source: std::io::Error| WeatherError::Io { path: path.to_path_buf(), source };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(io_err)?;

    let mut text = serde_json::to_string_pretty(value)
        .map_err(|e| io_err(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
    text.push('\n');

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(text.as_bytes()).map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    debug!(path = %path.display(), bytes = text.len(), "cache artifact written");
    Ok(())
}
