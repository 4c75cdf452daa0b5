// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-ZoneManager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of zone-manager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Zone manager: spaces of motion-sensor zones persisted as one JSON document.
//!
//! The crate is a single-crate layout: the data model and its normalization, the validation
//! rules, the serialized storage engine, and an MCP command surface on top.

pub mod catalog;
pub mod config;
pub mod logging;
pub mod mcp;
pub mod model;
pub mod store;
pub mod validate;

