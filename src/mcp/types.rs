// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-ZoneManager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of zone-manager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::Space;
use crate::validate::ValidationIssue;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SpaceListEntry {
    pub name: String,
    pub zones_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SpacesListResponse {
    pub spaces: Vec<SpaceListEntry>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SpaceParams {
    /// Space name; surrounding whitespace is ignored.
    pub space: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SpaceGetResponse {
    pub space: String,
    pub data: Space,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SpaceSaveParams {
    pub space: String,
    /// Full replacement for the space: `{"zones": {"<sensor id>": {...}}}`.
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct MutationResponse {
    pub ok: bool,
    /// Whether the follow-up write reached disk.
    pub persisted: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationIssue>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ZoneLookupParams {
    /// Sensor identifier used as the zone key, matched exactly.
    pub zone: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ZoneLookupResponse {
    pub found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    pub neighbors: Vec<String>,
    pub far_neighbors: Vec<String>,
    pub neighbor_groups: Vec<String>,
    pub light_group: Vec<String>,
    /// The only light group entry when there is exactly one, otherwise empty.
    pub light_group_single: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct McpArea {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AreasListResponse {
    pub areas: Vec<McpArea>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EntitiesForAreaParams {
    /// Area to filter by; omit or leave empty for all areas.
    #[serde(default)]
    pub area_id: Option<String>,
    /// Entity domains to include; defaults to `sensor` and `light`.
    #[serde(default)]
    pub domains: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct McpEntity {
    pub entity_id: String,
    pub name: String,
    pub domain: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EntitiesForAreaResponse {
    pub entities: Vec<McpEntity>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReloadResponse {
    pub ok: bool,
    pub spaces_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportResponse {
    pub ok: bool,
}
