// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-ZoneManager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of zone-manager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::document::{Document, Space, Zone, ZoneField};

/// Two-zone hallway that passes every validation rule.
pub(crate) fn hallway_space() -> Space {
    Space::new()
        .with_zone(
            "binary_sensor.hall_motion",
            Zone::new()
                .with(ZoneField::Neighbors, ["binary_sensor.kitchen_motion", "binary_sensor.stairs"])
                .with(ZoneField::FarNeighbors, ["binary_sensor.dining", "binary_sensor.landing"])
                .with(ZoneField::NeighborGroups, ["ground", "stairs"])
                .with(ZoneField::LightGroup, ["light.hall"]),
        )
        .with_zone(
            "binary_sensor.kitchen_motion",
            Zone::new()
                .with(ZoneField::Neighbors, ["binary_sensor.hall_motion"])
                .with(ZoneField::FarNeighbors, ["binary_sensor.stairs"])
                .with(ZoneField::NeighborGroups, ["ground"])
                .with(ZoneField::LightGroup, ["light.kitchen_main", "light.kitchen_counter"]),
        )
}

pub(crate) fn home_document() -> Document {
    Document::default()
        .with_space("Ground floor", hallway_space())
        .with_space("attic", Space::new())
}
