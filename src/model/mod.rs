// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-ZoneManager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of zone-manager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Document model for the persisted zone configuration.
//!
//! A document holds spaces, a space holds zones keyed by sensor identifier, and every zone
//! carries four ordered identifier lists.

mod document;
#[cfg(test)]
pub(crate) mod fixtures;
mod normalize;

pub use document::{Document, Space, Zone, ZoneField, DATA_VERSION, DEFAULT_CONFIG_FILENAME};
