// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-ZoneManager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of zone-manager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runtime settings for the zone manager process.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::warn;

use crate::model::DEFAULT_CONFIG_FILENAME;
use crate::store::DEFAULT_IO_TIMEOUT;

/// Environment variable consulted when `--config-path` is not given.
pub const CONFIG_PATH_ENV: &str = "ZONE_MANAGER_CONFIG_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub config_path: PathBuf,
    pub io_timeout: Duration,
    pub catalog_path: Option<PathBuf>,
}

impl Settings {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            io_timeout: DEFAULT_IO_TIMEOUT,
            catalog_path: None,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Picks the config file path: explicit flag, then environment, then
/// `<config_dir>/zone_manager.json`.
///
/// A value that was supplied but is blank is ignored with a warning.
pub fn resolve_config_path(
    explicit: Option<&str>,
    from_env: Option<&str>,
    config_dir: &Path,
) -> PathBuf {
    if let Some(path) = non_blank(explicit) {
        return PathBuf::from(path);
    }
    if let Some(path) = non_blank(from_env) {
        return PathBuf::from(path);
    }

    let fallback = config_dir.join(DEFAULT_CONFIG_FILENAME);
    if explicit.is_some() || from_env.is_some() {
        warn!(fallback = %fallback.display(), "config path is blank, using fallback");
    }
    fallback
}
