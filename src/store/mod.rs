// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-ZoneManager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of zone-manager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for the zone configuration.
//!
//! `config_file` owns the on-disk JSON format (atomic replace plus `.bak` copy); `engine` owns the
//! in-memory document and serializes load/save through a single gate.

pub mod config_file;
pub mod engine;

pub use config_file::{ConfigFile, DocumentFile, StoreError};
pub use engine::{
    LoadOutcome, SaveOutcome, SpaceError, SpaceSummary, StorePhase, ZoneMatch, ZoneStore,
    DEFAULT_IO_TIMEOUT,
};
