// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-ZoneManager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of zone-manager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::Serialize;

/// Version tag written into freshly created documents.
pub const DATA_VERSION: &str = "v0.1";

/// File name used when no explicit config path is configured.
pub const DEFAULT_CONFIG_FILENAME: &str = "zone_manager.json";

/// One of the four list fields every zone carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ZoneField {
    Neighbors,
    FarNeighbors,
    NeighborGroups,
    LightGroup,
}

impl ZoneField {
    pub const ALL: [ZoneField; 4] = [
        ZoneField::Neighbors,
        ZoneField::FarNeighbors,
        ZoneField::NeighborGroups,
        ZoneField::LightGroup,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neighbors => "neighbors",
            Self::FarNeighbors => "far_neighbors",
            Self::NeighborGroups => "neighbor_groups",
            Self::LightGroup => "light_group",
        }
    }
}

impl fmt::Display for ZoneField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Topology entry for one triggering sensor.
///
/// The zone key (the sensor identifier) lives in the owning [`Space`] map, not here.
/// `far_neighbors` and `neighbor_groups` are positionally paired with `neighbors`;
/// `light_group` is not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Zone {
    neighbors: Vec<String>,
    far_neighbors: Vec<String>,
    neighbor_groups: Vec<String>,
    light_group: Vec<String>,
}

impl Zone {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly useful in tests and fixtures.
    pub fn with<I, S>(mut self, field: ZoneField, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(field, values.into_iter().map(Into::into).collect());
        self
    }

    pub fn get(&self, field: ZoneField) -> &[String] {
        match field {
            ZoneField::Neighbors => &self.neighbors,
            ZoneField::FarNeighbors => &self.far_neighbors,
            ZoneField::NeighborGroups => &self.neighbor_groups,
            ZoneField::LightGroup => &self.light_group,
        }
    }

    pub fn set(&mut self, field: ZoneField, values: Vec<String>) {
        *self.slot_mut(field) = values;
    }

    fn slot_mut(&mut self, field: ZoneField) -> &mut Vec<String> {
        match field {
            ZoneField::Neighbors => &mut self.neighbors,
            ZoneField::FarNeighbors => &mut self.far_neighbors,
            ZoneField::NeighborGroups => &mut self.neighbor_groups,
            ZoneField::LightGroup => &mut self.light_group,
        }
    }

    pub fn neighbors(&self) -> &[String] {
        &self.neighbors
    }

    pub fn far_neighbors(&self) -> &[String] {
        &self.far_neighbors
    }

    pub fn neighbor_groups(&self) -> &[String] {
        &self.neighbor_groups
    }

    pub fn light_group(&self) -> &[String] {
        &self.light_group
    }

    pub(crate) fn fields_mut(&mut self) -> impl Iterator<Item = &mut Vec<String>> {
        [
            &mut self.neighbors,
            &mut self.far_neighbors,
            &mut self.neighbor_groups,
            &mut self.light_group,
        ]
        .into_iter()
    }
}

/// A named grouping of zones (a floor, a wing).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Space {
    zones: BTreeMap<String, Zone>,
}

impl Space {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone(mut self, key: impl Into<String>, zone: Zone) -> Self {
        self.zones.insert(key.into(), zone);
        self
    }

    pub fn zones(&self) -> &BTreeMap<String, Zone> {
        &self.zones
    }

    pub fn zones_mut(&mut self) -> &mut BTreeMap<String, Zone> {
        &mut self.zones
    }
}

/// Root of the persisted configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Document {
    version: String,
    spaces: BTreeMap<String, Space>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            version: DATA_VERSION.to_owned(),
            spaces: BTreeMap::new(),
        }
    }
}

impl Document {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            spaces: BTreeMap::new(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn spaces(&self) -> &BTreeMap<String, Space> {
        &self.spaces
    }

    pub fn spaces_mut(&mut self) -> &mut BTreeMap<String, Space> {
        &mut self.spaces
    }

    pub fn with_space(mut self, name: impl Into<String>, space: Space) -> Self {
        self.spaces.insert(name.into(), space);
        self
    }
}
