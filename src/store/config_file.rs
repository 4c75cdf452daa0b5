// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-ZoneManager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of zone-manager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::model::Document;

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    Json { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

/// Blocking persistence for a single document.
///
/// Implementations are driven from a background worker by the store engine, never from the
/// async scheduler itself.
pub trait DocumentFile: fmt::Debug + Send + Sync + 'static {
    fn path(&self) -> &Path;

    /// Returns the raw JSON at [`path`](Self::path), or `None` when the file is absent or cannot
    /// be read or parsed. Failures are logged, never returned.
    fn read(&self) -> Option<Value>;

    /// Replaces the file with `document`. The target path never observes a partial write.
    fn write(&self, document: &Document) -> Result<(), StoreError>;
}

/// The on-disk JSON config file, written atomically with a `.bak` copy of the previous version.
#[derive(Debug)]
pub struct ConfigFile {
    path: PathBuf,
    io_lock: Mutex<()>,
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io_lock: Mutex::new(()),
        }
    }

    pub fn backup_path(&self) -> PathBuf {
        backup_path_for(&self.path)
    }
}

impl DocumentFile for ConfigFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Option<Value> {
        let _io = self.io_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "config file does not exist");
                return None;
            }
            Err(err) => {
                error!(path = %self.path.display(), error = %err, "failed to read config file");
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(err) => {
                error!(path = %self.path.display(), error = %err, "config file is not valid JSON");
                None
            }
        }
    }

    fn write(&self, document: &Document) -> Result<(), StoreError> {
        let _io = self.io_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut contents = serde_json::to_string_pretty(document).map_err(|source| {
            StoreError::Json {
                path: self.path.clone(),
                source,
            }
        })?;
        contents.push('\n');

        write_atomic_with_backup(&self.path, contents.as_bytes()).inspect_err(|err| {
            error!(path = %self.path.display(), error = %err, "failed to write config file");
        })
    }
}

pub(crate) fn backup_path_for(path: &Path) -> PathBuf {
    let mut backup = OsString::from(path.as_os_str());
    backup.push(".bak");
    PathBuf::from(backup)
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

fn write_atomic_with_backup(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let parent = parent_dir(path);
    fs::create_dir_all(parent).map_err(|source| StoreError::Io {
        path: parent.to_path_buf(),
        source,
    })?;

    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    if path.is_file() {
        let backup = backup_path_for(path);
        match fs::copy(path, &backup) {
            Ok(_) => debug!(path = %backup.display(), "backup created"),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to create backup, writing anyway")
            }
        }
    }

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".zone_manager.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let staged = stage_temp_file(&tmp_path, contents)
        .and_then(|()| rename_overwrite(&tmp_path, path).map_err(|source| (path, source)));
    if let Err((failed_path, source)) = staged {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: failed_path.to_path_buf(),
            source,
        });
    }

    #[cfg(unix)]
    {
        if let Err(err) = fs::File::open(parent).and_then(|dir| dir.sync_all()) {
            warn!(path = %parent.display(), error = %err, "failed to sync config directory");
        }
    }

    Ok(())
}

fn stage_temp_file<'a>(tmp_path: &'a Path, contents: &[u8]) -> Result<(), (&'a Path, io::Error)> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(tmp_path)
        .map_err(|source| (tmp_path, source))?;
    file.write_all(contents).map_err(|source| (tmp_path, source))?;
    file.flush().map_err(|source| (tmp_path, source))?;
    file.sync_all().map_err(|source| (tmp_path, source))
}
