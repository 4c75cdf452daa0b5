// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-ZoneManager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of zone-manager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only catalog of areas and entities offered to authoring tools as candidate identifiers.
//!
//! The catalog never influences what the store accepts; it only feeds pickers.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::store::StoreError;

/// Domains listed when a caller does not ask for specific ones.
pub const DEFAULT_ENTITY_DOMAINS: [&str; 2] = ["sensor", "light"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Area {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Device {
    #[serde(default)]
    pub area_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EntityRecord {
    pub entity_id: String,
    #[serde(default)]
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub area_id: Option<String>,
    #[serde(default)]
    pub device_id: Option<String>,
}

impl EntityRecord {
    pub fn domain(&self) -> &str {
        self.entity_id
            .split_once('.')
            .map_or(self.entity_id.as_str(), |(domain, _)| domain)
    }

    pub fn display_name(&self) -> &str {
        [self.friendly_name.as_deref(), self.original_name.as_deref()]
            .into_iter()
            .flatten()
            .find(|name| !name.is_empty())
            .unwrap_or(self.entity_id.as_str())
    }
}

/// Source of areas, devices and entities.
pub trait EntityCatalog: Send + Sync {
    fn areas(&self) -> &[Area];
    fn entities(&self) -> &[EntityRecord];
    fn device_area(&self, device_id: &str) -> Option<&str>;
}

/// Catalog loaded once from a JSON snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StaticCatalog {
    #[serde(default)]
    areas: Vec<Area>,
    #[serde(default)]
    devices: BTreeMap<String, Device>,
    #[serde(default)]
    entities: Vec<EntityRecord>,
}

impl StaticCatalog {
    pub fn new(
        areas: Vec<Area>,
        devices: BTreeMap<String, Device>,
        entities: Vec<EntityRecord>,
    ) -> Self {
        Self {
            areas,
            devices,
            entities,
        }
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let contents = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl EntityCatalog for StaticCatalog {
    fn areas(&self) -> &[Area] {
        &self.areas
    }

    fn entities(&self) -> &[EntityRecord] {
        &self.entities
    }

    fn device_area(&self, device_id: &str) -> Option<&str> {
        self.devices.get(device_id)?.area_id.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySummary {
    pub entity_id: String,
    pub name: String,
    pub domain: String,
}

/// Areas ordered case-insensitively by name.
pub fn list_areas(catalog: &dyn EntityCatalog) -> Vec<Area> {
    let mut areas = catalog.areas().to_vec();
    areas.sort_by_key(|area| area.name.to_lowercase());
    areas
}

/// Entities in `domains`, optionally restricted to one area.
///
/// An entity without its own area inherits the area of its device. `None` or a blank `area_id`
/// matches every area. Results are ordered by domain, then case-insensitive name, then id.
pub fn entities_for_area(
    catalog: &dyn EntityCatalog,
    area_id: Option<&str>,
    domains: &BTreeSet<String>,
) -> Vec<EntitySummary> {
    let area_id = area_id.filter(|area_id| !area_id.trim().is_empty());

    let mut out = catalog
        .entities()
        .iter()
        .filter(|entity| domains.contains(entity.domain()))
        .filter(|entity| {
            let Some(wanted) = area_id else {
                return true;
            };
            let resolved = entity
                .area_id
                .as_deref()
                .or_else(|| entity.device_id.as_deref().and_then(|id| catalog.device_area(id)));
            resolved == Some(wanted)
        })
        .map(|entity| EntitySummary {
            entity_id: entity.entity_id.clone(),
            name: entity.display_name().to_owned(),
            domain: entity.domain().to_owned(),
        })
        .collect::<Vec<_>>();

    out.sort_by(|a, b| {
        (a.domain.as_str(), a.name.to_lowercase(), a.entity_id.as_str()).cmp(&(
            b.domain.as_str(),
            b.name.to_lowercase(),
            b.entity_id.as_str(),
        ))
    });
    out
}

pub fn default_domains() -> BTreeSet<String> {
    DEFAULT_ENTITY_DOMAINS.iter().map(|domain| (*domain).to_owned()).collect()
}
