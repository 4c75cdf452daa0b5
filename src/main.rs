// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-ZoneManager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of zone-manager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Zone manager CLI entrypoint.
//!
//! Loads the zone config once, then serves MCP over streamable HTTP at
//! `http://127.0.0.1:<port>/mcp`. Use `--stdio` to serve MCP over stdio instead.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use rmcp::transport::{
    streamable_http_server::session::local::LocalSessionManager, StreamableHttpServerConfig,
    StreamableHttpService,
};
use tracing::{error, info};

use zone_manager::catalog::{EntityCatalog, StaticCatalog};
use zone_manager::config::{resolve_config_path, Settings, CONFIG_PATH_ENV};
use zone_manager::mcp::ZoneManagerMcp;
use zone_manager::store::ZoneStore;

const DEFAULT_MCP_HTTP_PORT: u16 = 27436;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--config-path <file>] [--config-dir <dir>] [--catalog <file>] [--io-timeout-secs <n>] [--http-port <port>]\n  {program} [--config-path <file>] [--config-dir <dir>] [--catalog <file>] [--io-timeout-secs <n>] --stdio\n\nBy default MCP is served over streamable HTTP at `http://127.0.0.1:<port>/mcp`.\n--http-port selects the port (0 = ephemeral; default {DEFAULT_MCP_HTTP_PORT}).\n\nThe config file is --config-path, else ${CONFIG_PATH_ENV}, else <config-dir>/zone_manager.json.\nIf --config-dir is omitted, the current working directory is used.\n\n--io-timeout-secs bounds each config read and write (default 10, must be > 0)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: Option<String>,
    config_dir: Option<String>,
    catalog: Option<String>,
    io_timeout_secs: Option<u64>,
    stdio: bool,
    http_port: Option<u16>,
}

fn take_once(slot: &mut Option<String>, args: &mut impl Iterator<Item = String>) -> Result<(), ()> {
    if slot.is_some() {
        return Err(());
    }
    *slot = Some(args.next().ok_or(())?);
    Ok(())
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--stdio" => {
                if options.stdio {
                    return Err(());
                }
                options.stdio = true;
            }
            "--config-path" => take_once(&mut options.config_path, &mut args)?,
            "--config-dir" => take_once(&mut options.config_dir, &mut args)?,
            "--catalog" => take_once(&mut options.catalog, &mut args)?,
            "--io-timeout-secs" => {
                if options.io_timeout_secs.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let secs: u64 = raw.parse().map_err(|_| ())?;
                if secs == 0 {
                    return Err(());
                }
                options.io_timeout_secs = Some(secs);
            }
            "--http-port" => {
                if options.http_port.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let port: u16 = raw.parse().map_err(|_| ())?;
                options.http_port = Some(port);
            }
            _ => return Err(()),
        }
    }

    if options.stdio && options.http_port.is_some() {
        return Err(());
    }

    Ok(options)
}

fn settings_from(options: &CliOptions) -> Settings {
    let from_env = std::env::var(CONFIG_PATH_ENV).ok();
    let config_dir = PathBuf::from(options.config_dir.as_deref().unwrap_or("."));
    let config_path =
        resolve_config_path(options.config_path.as_deref(), from_env.as_deref(), &config_dir);

    let mut settings = Settings::new(config_path);
    if let Some(secs) = options.io_timeout_secs {
        settings.io_timeout = Duration::from_secs(secs);
    }
    settings.catalog_path = options.catalog.as_ref().map(PathBuf::from);
    settings
}

async fn serve_http(mcp: ZoneManagerMcp, port: u16) -> Result<(), Box<dyn Error>> {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    info!(addr = %listener.local_addr()?, "serving MCP over streamable HTTP at /mcp");

    let config = StreamableHttpServerConfig {
        stateful_mode: true,
        ..StreamableHttpServerConfig::default()
    };
    let shutdown_token = config.cancellation_token.clone();

    let session_manager = Arc::new(LocalSessionManager::default());
    let mcp_service = StreamableHttpService::new(move || Ok(mcp.clone()), session_manager, config);

    let router = Router::new().nest_service("/mcp", mcp_service);
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            shutdown_token.cancel();
        })
        .await?;
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "zone-manager".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        zone_manager::logging::init(zone_manager::logging::DEFAULT_DIRECTIVE);
        let settings = settings_from(&options);

        let catalog: Arc<dyn EntityCatalog> = match settings.catalog_path.as_deref() {
            Some(path) => Arc::new(StaticCatalog::load(path)?),
            None => Arc::new(StaticCatalog::default()),
        };

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async move {
            let store = ZoneStore::open(&settings.config_path).with_io_timeout(settings.io_timeout);
            let outcome = store.load().await;
            info!(path = %settings.config_path.display(), outcome = ?outcome, "zone config ready");

            let mcp = ZoneManagerMcp::new_with_catalog(Arc::new(store), catalog);
            if options.stdio {
                mcp.serve_stdio().await?;
            } else {
                serve_http(mcp, options.http_port.unwrap_or(DEFAULT_MCP_HTTP_PORT)).await?;
            }
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        error!(error = %err, "zone-manager exited with an error");
        eprintln!("zone-manager: {err}");
        std::process::exit(1);
    }
}
