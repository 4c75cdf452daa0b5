// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-ZoneManager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of zone-manager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The zone store engine: single owner of the in-memory document.
//!
//! `load`/`save` serialize through an async gate (FIFO) and run the blocking file I/O on a
//! background worker under a timeout. CRUD methods are synchronous and only touch the in-memory
//! document, so they never wait on the gate.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::config_file::{ConfigFile, DocumentFile};
use crate::model::{Document, Space, Zone};

/// Upper bound for a single read or write of the config file.
pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorePhase {
    Unloaded,
    Loading,
    Ready,
    Saving,
}

/// Where the document published by [`ZoneStore::load`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file parsed and was already in canonical shape.
    FromDisk,
    /// The file parsed but had to be normalized; the repaired form is written back.
    Repaired,
    /// The file was missing, unreadable, or timed out; an empty document was created and written.
    Fresh,
}

impl LoadOutcome {
    fn needs_save(self) -> bool {
        !matches!(self, Self::FromDisk)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    TimedOut,
    Failed,
}

impl SaveOutcome {
    pub fn is_saved(self) -> bool {
        matches!(self, Self::Saved)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::TimedOut => "timed_out",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceError {
    Exists { space: String },
    NotFound { space: String },
    InvalidName { space: String },
}

impl SpaceError {
    /// Stable machine-readable code for protocol surfaces.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Exists { .. } => "space_exists",
            Self::NotFound { .. } => "space_not_found",
            Self::InvalidName { .. } => "invalid_space_name",
        }
    }

    pub fn space(&self) -> &str {
        match self {
            Self::Exists { space } | Self::NotFound { space } | Self::InvalidName { space } => {
                space
            }
        }
    }
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exists { space } => write!(f, "space {space:?} already exists"),
            Self::NotFound { space } => write!(f, "space {space:?} not found"),
            Self::InvalidName { space } => write!(f, "invalid space name {space:?}"),
        }
    }
}

impl std::error::Error for SpaceError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceSummary {
    pub name: String,
    pub zones_count: usize,
}

/// A zone found by [`ZoneStore::find_zone`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneMatch {
    pub space: String,
    pub zone_key: String,
    pub zone: Zone,
}

#[derive(Debug)]
enum IoFailure {
    TimedOut,
    Worker(String),
}

#[derive(Debug)]
struct StoreState {
    document: Document,
    phase: StorePhase,
    /// Bumped on every in-memory mutation; lets `save` detect edits made while it was writing.
    rev: u64,
}

#[derive(Debug)]
pub struct ZoneStore {
    file: Arc<dyn DocumentFile>,
    io_timeout: Duration,
    gate: tokio::sync::Mutex<()>,
    state: Mutex<StoreState>,
}

impl ZoneStore {
    pub fn new(file: impl DocumentFile) -> Self {
        Self::from_shared(Arc::new(file))
    }

    pub fn from_shared(file: Arc<dyn DocumentFile>) -> Self {
        Self {
            file,
            io_timeout: DEFAULT_IO_TIMEOUT,
            gate: tokio::sync::Mutex::new(()),
            state: Mutex::new(StoreState {
                document: Document::default(),
                phase: StorePhase::Unloaded,
                rev: 0,
            }),
        }
    }

    /// Store backed by the JSON file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(ConfigFile::new(path))
    }

    pub fn with_io_timeout(mut self, io_timeout: Duration) -> Self {
        self.io_timeout = io_timeout;
        self
    }

    pub fn io_timeout(&self) -> Duration {
        self.io_timeout
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn phase(&self) -> StorePhase {
        self.state().phase
    }

    /// Snapshot of the current document.
    pub fn document(&self) -> Document {
        self.state().document.clone()
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_phase(&self, phase: StorePhase) {
        self.state().phase = phase;
    }

    async fn run_blocking<T, F>(&self, job: F) -> Result<T, IoFailure>
    where
        T: Send + 'static,
        F: FnOnce(&dyn DocumentFile) -> T + Send + 'static,
    {
        let file = Arc::clone(&self.file);
        let handle = tokio::task::spawn_blocking(move || job(file.as_ref()));
        match tokio::time::timeout(self.io_timeout, handle).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(IoFailure::Worker(err.to_string())),
            Err(_) => Err(IoFailure::TimedOut),
        }
    }

    /// Reads the file and publishes its normalized contents.
    ///
    /// A missing, corrupt or slow file never fails the load: an empty document is published
    /// instead. Whenever the published document differs from what is on disk, a save runs after
    /// the gate is released.
    pub async fn load(&self) -> LoadOutcome {
        let outcome = {
            let _gate = self.gate.lock().await;
            self.set_phase(StorePhase::Loading);
            let path = self.path().display().to_string();
            info!(path = %path, "loading zone config");

            debug!(path = %path, "reading config file (worker) start");
            let raw = match self.run_blocking(|file| file.read()).await {
                Ok(raw) => raw,
                Err(IoFailure::TimedOut) => {
                    error!(path = %path, timeout = ?self.io_timeout, "timed out reading config file, using empty config");
                    None
                }
                Err(IoFailure::Worker(err)) => {
                    error!(path = %path, error = %err, "config read worker failed, using empty config");
                    None
                }
            };
            debug!(path = %path, "reading config file (worker) done");

            let (document, outcome) = match raw {
                None => {
                    warn!(path = %path, "config file missing or invalid, creating a new one");
                    (Document::default(), LoadOutcome::Fresh)
                }
                Some(raw) => {
                    let document = Document::from_value(&raw);
                    if document.matches_value(&raw) {
                        (document, LoadOutcome::FromDisk)
                    } else {
                        warn!(path = %path, "config file needed repair, rewriting normalized form");
                        (document, LoadOutcome::Repaired)
                    }
                }
            };

            let mut state = self.state();
            info!(spaces = document.spaces().len(), "loaded zone config");
            state.document = document;
            state.rev += 1;
            state.phase = StorePhase::Ready;
            outcome
        };

        // Saving takes the gate again, so it must run after the load's guard is gone.
        if outcome.needs_save() {
            self.save().await;
        }
        outcome
    }

    /// Re-reads the file, discarding in-memory state.
    pub async fn reload(&self) -> LoadOutcome {
        info!("reload requested");
        self.load().await
    }

    /// Writes the normalized in-memory document to disk.
    ///
    /// Failures and timeouts are logged and reported through the outcome; the in-memory document
    /// stays authoritative and nothing is retried.
    pub async fn save(&self) -> SaveOutcome {
        let _gate = self.gate.lock().await;

        let (payload, rev) = {
            let mut state = self.state();
            state.phase = StorePhase::Saving;
            (state.document.clone().normalized(), state.rev)
        };
        let path = self.path().display().to_string();
        info!(path = %path, "saving zone config");

        debug!(path = %path, "writing config file (worker) start");
        let result = self
            .run_blocking(move |file| file.write(&payload).map(|()| payload))
            .await;
        debug!(path = %path, "writing config file (worker) done");

        let mut state = self.state();
        state.phase = StorePhase::Ready;
        match result {
            Ok(Ok(payload)) => {
                debug!(spaces = payload.spaces().len(), "save completed");
                if state.rev == rev {
                    state.document = payload;
                }
                SaveOutcome::Saved
            }
            Ok(Err(err)) => {
                error!(path = %path, error = %err, "failed to write config file");
                SaveOutcome::Failed
            }
            Err(IoFailure::TimedOut) => {
                error!(path = %path, timeout = ?self.io_timeout, "timed out writing config file");
                SaveOutcome::TimedOut
            }
            Err(IoFailure::Worker(err)) => {
                error!(path = %path, error = %err, "config write worker failed");
                SaveOutcome::Failed
            }
        }
    }

    /// Every space with its zone count, ordered case-insensitively by name.
    pub fn list_spaces(&self) -> Vec<SpaceSummary> {
        let state = self.state();
        let mut spaces = state
            .document
            .spaces()
            .iter()
            .map(|(name, space)| SpaceSummary {
                name: name.clone(),
                zones_count: space.zones().len(),
            })
            .collect::<Vec<_>>();
        spaces.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        spaces
    }

    pub fn get_space(&self, name: &str) -> Option<Space> {
        self.state().document.spaces().get(name).cloned()
    }

    pub fn create_space(&self, name: &str) -> Result<(), SpaceError> {
        check_space_name(name)?;
        let mut state = self.state();
        if state.document.spaces().contains_key(name) {
            return Err(SpaceError::Exists {
                space: name.to_owned(),
            });
        }
        state.document.spaces_mut().insert(name.to_owned(), Space::new());
        state.rev += 1;
        debug!(space = %name, "space created");
        Ok(())
    }

    pub fn delete_space(&self, name: &str) -> Result<(), SpaceError> {
        let mut state = self.state();
        if state.document.spaces_mut().remove(name).is_none() {
            return Err(SpaceError::NotFound {
                space: name.to_owned(),
            });
        }
        state.rev += 1;
        debug!(space = %name, "space deleted");
        Ok(())
    }

    /// Replaces (or creates) a space with the normalized form of `space`.
    ///
    /// Only the in-memory document changes; call [`save`](Self::save) to persist.
    pub fn save_space(&self, name: &str, space: Space) -> Result<(), SpaceError> {
        check_space_name(name)?;
        let space = space.normalized();
        let zones = space.zones().len();
        let mut state = self.state();
        state.document.spaces_mut().insert(name.to_owned(), space);
        state.rev += 1;
        debug!(space = %name, zones, "space saved");
        Ok(())
    }

    /// First zone keyed by `identifier`, scanning spaces in [`list_spaces`](Self::list_spaces)
    /// order.
    pub fn find_zone(&self, identifier: &str) -> Option<ZoneMatch> {
        let order = self.list_spaces();
        let state = self.state();
        order.into_iter().find_map(|summary| {
            let zone = state.document.spaces().get(&summary.name)?.zones().get(identifier)?;
            Some(ZoneMatch {
                space: summary.name,
                zone_key: identifier.to_owned(),
                zone: zone.clone(),
            })
        })
    }
}

fn check_space_name(name: &str) -> Result<(), SpaceError> {
    if name.trim().is_empty() {
        return Err(SpaceError::InvalidName {
            space: name.to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests;
