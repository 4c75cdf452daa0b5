// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-ZoneManager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of zone-manager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{json, Map, Value};
use zone_manager::model::{Document, Space, Zone, ZoneField};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(prefix: &str) -> Self {
        let pid = std::process::id();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut path = std::env::temp_dir();
        path.push(format!("zone_manager_bench_{prefix}_{pid}_{nanos}_{counter}"));
        std::fs::create_dir_all(&path).expect("create temp dir");

        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    Medium,
    Large,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    fn shape(self) -> (usize, usize, usize) {
        // (spaces, zones per space, neighbors per zone)
        match self {
            Self::Small => (2, 8, 3),
            Self::Medium => (8, 32, 6),
            Self::Large => (24, 64, 10),
        }
    }
}

fn sensor(space: usize, zone: usize) -> String {
    format!("binary_sensor.s{space:02}_z{zone:03}")
}

fn zone(space: usize, zone_index: usize, zones: usize, neighbors: usize) -> Zone {
    let near = (1..=neighbors)
        .map(|step| sensor(space, (zone_index + step) % zones))
        .collect::<Vec<_>>();
    let far = (1..=neighbors)
        .map(|step| sensor(space, (zone_index + neighbors + step) % zones))
        .collect::<Vec<_>>();
    let groups = (0..neighbors).map(|step| format!("group_{}", step % 3)).collect::<Vec<_>>();

    Zone::new()
        .with(ZoneField::Neighbors, near)
        .with(ZoneField::FarNeighbors, far)
        .with(ZoneField::NeighborGroups, groups)
        .with(ZoneField::LightGroup, [format!("light.s{space:02}_z{zone_index:03}")])
}

/// Canonical document; every zone is valid.
pub fn document(case: Case) -> Document {
    let (spaces, zones, neighbors) = case.shape();
    let mut document = Document::default();
    for space_index in 0..spaces {
        let mut space = Space::new();
        for zone_index in 0..zones {
            space = space.with_zone(
                sensor(space_index, zone_index),
                zone(space_index, zone_index, zones, neighbors),
            );
        }
        document = document.with_space(format!("Space {space_index:02}"), space);
    }
    document
}

/// The same document as raw JSON with blank entries, stray types and unknown keys mixed in,
/// so normalization has work to do.
pub fn messy_value(case: Case) -> Value {
    let mut raw = serde_json::to_value(document(case)).expect("serialize document");
    if let Some(spaces) = raw.get_mut("spaces").and_then(Value::as_object_mut) {
        for space in spaces.values_mut() {
            let Some(zones) = space.get_mut("zones").and_then(Value::as_object_mut) else {
                continue;
            };
            for zone in zones.values_mut() {
                if let Some(neighbors) = zone.get_mut("neighbors").and_then(Value::as_array_mut) {
                    neighbors.push(json!(""));
                    neighbors.push(json!(42));
                }
                if let Some(fields) = zone.as_object_mut() {
                    fields.insert("legacy".to_owned(), json!(true));
                }
            }
            if let Some(fields) = space.as_object_mut() {
                fields.insert("  ".to_owned(), Value::Object(Map::new()));
            }
        }
    }
    raw
}
