//! Save/load persistence
//!
//! Features:
//! - Versioned JSON envelope
//! - Atomic writes (tmp → save, old save → backup)
//! - Corruption detection and recovery from the backup

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current envelope format version
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("corrupt save {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(
        "unsupported save version {found} in {} (expected {})",
        .path.display(),
        SAVE_VERSION
    )]
    UnsupportedVersion { path: PathBuf, found: u32 },
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    payload: &'a T,
}

#[derive(Deserialize)]
struct Envelope<T> {
    version: u32,
    payload: T,
}

/// Path of the rotated previous save
pub fn backup_path(path: &Path) -> PathBuf {
    sibling(path, ".bak")
}

fn temp_path(path: &Path) -> PathBuf {
    sibling(path, ".tmp")
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> PersistenceError + '_ {
    move |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write `value` to `path`, keeping the previous save as a backup
pub fn save<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }

    let envelope = EnvelopeRef {
        version: SAVE_VERSION,
        payload: value,
    };
    let json = serde_json::to_string_pretty(&envelope).map_err(|source| PersistenceError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp = temp_path(path);
    fs::write(&tmp, json).map_err(io_error(&tmp))?;

    if path.exists() {
        let backup = backup_path(path);
        fs::rename(path, &backup).map_err(io_error(&backup))?;
    }
    fs::rename(&tmp, path).map_err(io_error(path))?;
    Ok(())
}

/// Read a save, falling back to the backup when the primary is unreadable.
///
/// Returns `Ok(None)` when neither file exists.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, PersistenceError> {
    match read(path) {
        Ok(Some(value)) => Ok(Some(value)),
        Ok(None) => read(&backup_path(path)),
        Err(err) => {
            log::warn!("{err}, trying backup");
            match read(&backup_path(path)) {
                Ok(Some(value)) => {
                    log::info!("Recovered {} from backup", path.display());
                    Ok(Some(value))
                }
                _ => Err(err),
            }
        }
    }
}

fn read<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, PersistenceError> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(io_error(path)(err)),
    };

    let envelope: Envelope<serde_json::Value> =
        serde_json::from_str(&json).map_err(|source| PersistenceError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    if envelope.version != SAVE_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: envelope.version,
        });
    }

    serde_json::from_value(envelope.payload)
        .map(Some)
        .map_err(|source| PersistenceError::Json {
            path: path.to_path_buf(),
            source,
        })
}
