// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-ZoneManager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of zone-manager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Cross-field rules a space must satisfy before it is committed.
//!
//! Validation is pure: it never mutates the space and reports every violation it finds as a
//! [`ValidationIssue`]. An empty list is the only success signal.

use std::collections::HashSet;
use std::fmt;

use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;

use crate::model::{Space, Zone, ZoneField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    SelfReference,
    Duplicate,
    LengthMismatch,
    InvalidType,
}

impl IssueCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SelfReference => "self_reference",
            Self::Duplicate => "duplicate",
            Self::LengthMismatch => "length_mismatch",
            Self::InvalidType => "invalid_type",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rule violation, positioned by zone, field and (for list entries) index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ValidationIssue {
    pub zone: String,
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub code: IssueCode,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<usize>,
}

impl ValidationIssue {
    fn at(zone: &str, field: ZoneField, index: usize, code: IssueCode, text: String) -> Self {
        Self {
            zone: zone.to_owned(),
            field: field.as_str().to_owned(),
            index: Some(index),
            code,
            text,
            expected: None,
            actual: None,
        }
    }

    fn length_mismatch(zone: &str, field: ZoneField, expected: usize, actual: usize) -> Self {
        Self {
            zone: zone.to_owned(),
            field: field.as_str().to_owned(),
            index: None,
            code: IssueCode::LengthMismatch,
            text: format!("{field} length must match neighbors length"),
            expected: Some(expected),
            actual: Some(actual),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: zone {:?} field {}", self.code, self.zone, self.field)?;
        if let Some(index) = self.index {
            write!(f, "[{index}]")?;
        }
        write!(f, ": {}", self.text)
    }
}

/// Validates a normalized space.
///
/// Per zone, issues are reported in this order: self references in `neighbors`, self references
/// in `far_neighbors`, duplicates in `neighbors`, duplicates in `far_neighbors`, then length
/// mismatches for `far_neighbors` and `neighbor_groups`. Zones are visited in key order.
pub fn validate_space(space: &Space) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for (key, zone) in space.zones() {
        validate_zone(key, zone, &mut issues);
    }
    issues
}

/// Validates an untrusted request payload.
///
/// A payload that is not an object, or whose `zones` is present but not an object, is rejected
/// with a single `invalid_type` issue instead of being silently emptied by normalization.
pub fn validate_space_value(raw: &Value) -> Vec<ValidationIssue> {
    let zones_ok = match raw {
        Value::Object(fields) => fields
            .get("zones")
            .map_or(true, |zones| zones.is_object() || zones.is_null()),
        _ => false,
    };
    if !zones_ok {
        return vec![ValidationIssue {
            zone: String::new(),
            field: "zones".to_owned(),
            index: None,
            code: IssueCode::InvalidType,
            text: "zones must be an object".to_owned(),
            expected: None,
            actual: None,
        }];
    }

    validate_space(&Space::from_value(raw))
}

fn validate_zone(key: &str, zone: &Zone, issues: &mut Vec<ValidationIssue>) {
    for field in [ZoneField::Neighbors, ZoneField::FarNeighbors] {
        for (index, value) in zone.get(field).iter().enumerate() {
            if value == key {
                issues.push(ValidationIssue::at(
                    key,
                    field,
                    index,
                    IssueCode::SelfReference,
                    format!("zone sensor cannot be in its own {}", field_label(field)),
                ));
            }
        }
    }

    // Overlap between neighbors and far_neighbors is allowed; only repeats within one list count.
    for field in [ZoneField::Neighbors, ZoneField::FarNeighbors] {
        let mut seen = HashSet::new();
        for (index, value) in zone.get(field).iter().enumerate() {
            if !seen.insert(value.as_str()) {
                issues.push(ValidationIssue::at(
                    key,
                    field,
                    index,
                    IssueCode::Duplicate,
                    format!("duplicate value in {}", field_label(field)),
                ));
            }
        }
    }

    let expected = zone.neighbors().len();
    for field in [ZoneField::FarNeighbors, ZoneField::NeighborGroups] {
        let actual = zone.get(field).len();
        if actual != expected {
            issues.push(ValidationIssue::length_mismatch(key, field, expected, actual));
        }
    }
}

fn field_label(field: ZoneField) -> &'static str {
    match field {
        ZoneField::Neighbors => "neighbors",
        ZoneField::FarNeighbors => "far neighbors",
        ZoneField::NeighborGroups => "neighbor groups",
        ZoneField::LightGroup => "light group",
    }
}
