// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-ZoneManager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of zone-manager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Lossy, total normalization of untrusted JSON into the document model.
//!
//! Nothing in here fails: wrong shapes degrade to empty values, blank keys and non-string list
//! entries are dropped. Applying any of these functions to already-normalized data is a no-op.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::document::{Document, Space, Zone, ZoneField, DATA_VERSION};

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn version_tag(raw: Option<&Value>) -> String {
    match raw {
        Some(Value::String(version)) if !version.is_empty() => version.clone(),
        Some(Value::Number(number)) if number.as_f64() != Some(0.0) => number.to_string(),
        _ => DATA_VERSION.to_owned(),
    }
}

fn as_object(raw: Option<&Value>) -> Option<&Map<String, Value>> {
    raw.and_then(Value::as_object)
}

fn string_list(raw: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = raw else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_str)
        .filter(|item| !is_blank(item))
        .map(str::to_owned)
        .collect()
}

impl Zone {
    /// Builds a zone from arbitrary JSON, keeping only non-blank string entries.
    pub fn from_value(raw: &Value) -> Self {
        let fields = raw.as_object();
        let mut zone = Zone::new();
        for field in ZoneField::ALL {
            zone.set(field, string_list(fields.and_then(|fields| fields.get(field.as_str()))));
        }
        zone
    }

    pub fn normalized(mut self) -> Self {
        for values in self.fields_mut() {
            values.retain(|value| !is_blank(value));
        }
        self
    }
}

impl Space {
    /// Builds a space from arbitrary JSON. Anything that is not `{"zones": {...}}` becomes an
    /// empty space.
    pub fn from_value(raw: &Value) -> Self {
        let mut space = Space::new();
        let Some(zones) = as_object(raw.get("zones")) else {
            return space;
        };

        for (key, zone) in zones {
            if is_blank(key) {
                continue;
            }
            space.zones_mut().insert(key.clone(), Zone::from_value(zone));
        }
        space
    }

    pub fn normalized(self) -> Self {
        let zones = self
            .zones()
            .iter()
            .filter(|(key, _)| !is_blank(key))
            .map(|(key, zone)| (key.clone(), zone.clone().normalized()))
            .collect::<BTreeMap<_, _>>();
        let mut space = Space::new();
        *space.zones_mut() = zones;
        space
    }
}

impl Document {
    /// Builds a document from arbitrary JSON. Unknown root keys are dropped.
    pub fn from_value(raw: &Value) -> Self {
        let Some(root) = raw.as_object() else {
            return Document::default();
        };

        let mut document = Document::new(version_tag(root.get("version")));
        if let Some(spaces) = as_object(root.get("spaces")) {
            for (name, space) in spaces {
                if is_blank(name) {
                    continue;
                }
                document.spaces_mut().insert(name.clone(), Space::from_value(space));
            }
        }
        document
    }

    pub fn normalized(self) -> Self {
        let version = if self.version().is_empty() {
            DATA_VERSION.to_owned()
        } else {
            self.version().to_owned()
        };
        let mut document = Document::new(version);
        for (name, space) in self.spaces() {
            if is_blank(name) {
                continue;
            }
            document.spaces_mut().insert(name.clone(), space.clone().normalized());
        }
        document
    }

    /// Whether `raw` is exactly the JSON form of this document, i.e. loading it needed no repair.
    pub fn matches_value(&self, raw: &Value) -> bool {
        serde_json::to_value(self).is_ok_and(|canonical| canonical == *raw)
    }
}
