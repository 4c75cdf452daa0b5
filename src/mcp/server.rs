// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-ZoneManager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of zone-manager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::{Json, Parameters};
use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler, ServiceExt};
use tracing::{debug, info, warn};

use crate::catalog::{self, EntityCatalog, StaticCatalog};
use crate::model::Space;
use crate::store::{SpaceError, ZoneMatch, ZoneStore};
use crate::validate::validate_space_value;

use super::types::*;

#[derive(Clone)]
pub struct ZoneManagerMcp {
    store: Arc<ZoneStore>,
    catalog: Arc<dyn EntityCatalog>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ZoneManagerMcp {
    /// Serves `store`, which is expected to be loaded already.
    pub fn new(store: Arc<ZoneStore>) -> Self {
        Self::new_with_catalog(store, Arc::new(StaticCatalog::default()))
    }

    pub fn new_with_catalog(store: Arc<ZoneStore>, catalog: Arc<dyn EntityCatalog>) -> Self {
        Self {
            store,
            catalog,
            tool_router: Self::tool_router(),
        }
    }

    pub fn store(&self) -> &Arc<ZoneStore> {
        &self.store
    }

    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }

    /// List spaces with their zone counts, ordered case-insensitively by name; start here,
    /// then call `space.get`.
    #[tool(name = "spaces.list")]
    async fn spaces_list(&self) -> Result<Json<SpacesListResponse>, ErrorData> {
        debug!("spaces.list called");
        let spaces = self
            .store
            .list_spaces()
            .into_iter()
            .map(|summary| SpaceListEntry {
                name: summary.name,
                zones_count: summary.zones_count,
            })
            .collect();
        Ok(Json(SpacesListResponse { spaces }))
    }

    /// Get one space with all of its zones.
    #[tool(name = "space.get")]
    async fn space_get(
        &self,
        params: Parameters<SpaceParams>,
    ) -> Result<Json<SpaceGetResponse>, ErrorData> {
        let space = trimmed(params.0.space);
        debug!(space = %space, "space.get called");
        let Some(data) = self.store.get_space(&space) else {
            return Err(space_error(SpaceError::NotFound { space }));
        };
        Ok(Json(SpaceGetResponse { space, data }))
    }

    /// Create an empty space and persist the config; fails with `space_exists` when taken.
    #[tool(name = "space.create")]
    async fn space_create(
        &self,
        params: Parameters<SpaceParams>,
    ) -> Result<Json<MutationResponse>, ErrorData> {
        let space = trimmed(params.0.space);
        info!(space = %space, "space.create");
        self.store.create_space(&space).map_err(space_error)?;
        Ok(Json(self.commit().await))
    }

    /// Delete a space and persist the config; fails with `space_not_found` when absent.
    #[tool(name = "space.delete")]
    async fn space_delete(
        &self,
        params: Parameters<SpaceParams>,
    ) -> Result<Json<MutationResponse>, ErrorData> {
        let space = trimmed(params.0.space);
        info!(space = %space, "space.delete");
        self.store.delete_space(&space).map_err(space_error)?;
        Ok(Json(self.commit().await))
    }

    /// Replace a space with `data` after validation. Rule violations come back as
    /// `{ok: false, errors}` and leave the stored space untouched.
    #[tool(name = "space.save")]
    async fn space_save(
        &self,
        params: Parameters<SpaceSaveParams>,
    ) -> Result<Json<MutationResponse>, ErrorData> {
        let SpaceSaveParams { space, data } = params.0;
        let space = trimmed(space);
        info!(space = %space, "space.save");

        let errors = validate_space_value(&data);
        if !errors.is_empty() {
            warn!(space = %space, errors = errors.len(), "space.save rejected by validation");
            return Ok(Json(MutationResponse {
                ok: false,
                persisted: false,
                errors,
            }));
        }

        self.store
            .save_space(&space, Space::from_value(&data))
            .map_err(space_error)?;
        Ok(Json(self.commit().await))
    }

    /// Find the zone keyed by a sensor identifier in any space; `found` is false when no space
    /// has it.
    #[tool(name = "zone.lookup")]
    async fn zone_lookup(
        &self,
        params: Parameters<ZoneLookupParams>,
    ) -> Result<Json<ZoneLookupResponse>, ErrorData> {
        let ZoneLookupParams { zone } = params.0;
        debug!(zone = %zone, "zone.lookup called");
        let response = self
            .store
            .find_zone(&zone)
            .map(lookup_response)
            .unwrap_or_default();
        Ok(Json(response))
    }

    /// List areas from the entity catalog, ordered by name.
    #[tool(name = "areas.list")]
    async fn areas_list(&self) -> Result<Json<AreasListResponse>, ErrorData> {
        debug!("areas.list called");
        let areas = catalog::list_areas(self.catalog.as_ref())
            .into_iter()
            .map(|area| McpArea {
                id: area.id,
                name: area.name,
            })
            .collect();
        Ok(Json(AreasListResponse { areas }))
    }

    /// List candidate entities for an area (all areas when `area_id` is empty), filtered by
    /// domain.
    #[tool(name = "entities.for_area")]
    async fn entities_for_area(
        &self,
        params: Parameters<EntitiesForAreaParams>,
    ) -> Result<Json<EntitiesForAreaResponse>, ErrorData> {
        let EntitiesForAreaParams { area_id, domains } = params.0;
        let domains = domains
            .map(|domains| domains.into_iter().collect::<BTreeSet<_>>())
            .unwrap_or_else(catalog::default_domains);
        debug!(area_id = ?area_id, domains = ?domains, "entities.for_area called");

        let entities =
            catalog::entities_for_area(self.catalog.as_ref(), area_id.as_deref(), &domains)
                .into_iter()
                .map(|entity| McpEntity {
                    entity_id: entity.entity_id,
                    name: entity.name,
                    domain: entity.domain,
                })
                .collect();
        Ok(Json(EntitiesForAreaResponse { entities }))
    }

    /// Re-read the config file from disk, discarding unsaved in-memory changes.
    #[tool(name = "config.reload")]
    async fn config_reload(&self) -> Result<Json<ReloadResponse>, ErrorData> {
        info!("config.reload called");
        self.store.reload().await;
        Ok(Json(ReloadResponse {
            ok: true,
            spaces_count: self.store.list_spaces().len(),
        }))
    }

    /// Write the current config to disk now.
    #[tool(name = "config.export")]
    async fn config_export(&self) -> Result<Json<ExportResponse>, ErrorData> {
        info!("config.export called");
        let outcome = self.store.save().await;
        if !outcome.is_saved() {
            return Err(unknown_error("failed to export zone config", outcome.as_str()));
        }
        Ok(Json(ExportResponse { ok: true }))
    }
}

impl ZoneManagerMcp {
    async fn commit(&self) -> MutationResponse {
        let persisted = self.store.save().await.is_saved();
        MutationResponse {
            ok: true,
            persisted,
            errors: Vec::new(),
        }
    }
}

#[tool_handler]
impl ServerHandler for ZoneManagerMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Zone manager configuration server (tools: spaces.list, space.get, space.create, space.delete, space.save, zone.lookup, areas.list, entities.for_area, config.reload, config.export)"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

include!("server/helpers.rs");
