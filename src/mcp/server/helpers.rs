// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-ZoneManager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of zone-manager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

// MCP server helper functions:
// request normalization and mapping of store results onto protocol payloads.
fn trimmed(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_owned()
    }
}

fn space_error(err: SpaceError) -> ErrorData {
    let data = Some(serde_json::json!({ "code": err.code(), "space": err.space() }));
    let message = err.to_string();
    match err {
        SpaceError::NotFound { .. } => ErrorData::resource_not_found(message, data),
        SpaceError::Exists { .. } => ErrorData::invalid_request(message, data),
        SpaceError::InvalidName { .. } => ErrorData::invalid_params(message, data),
    }
}

fn unknown_error(message: &'static str, detail: &str) -> ErrorData {
    ErrorData::internal_error(
        message,
        Some(serde_json::json!({ "code": "unknown_error", "detail": detail })),
    )
}

fn lookup_response(found: ZoneMatch) -> ZoneLookupResponse {
    let ZoneMatch {
        space,
        zone_key,
        zone,
    } = found;
    let light_group = zone.light_group().to_vec();
    let light_group_single = match light_group.as_slice() {
        [only] => only.clone(),
        _ => String::new(),
    };

    ZoneLookupResponse {
        found: true,
        space: Some(space),
        zone: Some(zone_key),
        neighbors: zone.neighbors().to_vec(),
        far_neighbors: zone.far_neighbors().to_vec(),
        neighbor_groups: zone.neighbor_groups().to_vec(),
        light_group,
        light_group_single,
    }
}
