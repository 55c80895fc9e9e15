//! `gaia serve` - Start the HTTP tool gateway.

use anyhow::{Context, Result};
use gaia_adapter_supabase::SupabaseClient;
use gaia_core::GaiaConfig;
use gaia_tools::{ApiKeyAuth, HttpServer, ToolExecutor};
use std::sync::Arc;

pub async fn run(config: GaiaConfig) -> Result<()> {
    let client = SupabaseClient::from_config(&config).context("Failed to configure upstream client")?;
    tracing::info!(upstream = %client.base_url(), "Upstream configured");

    let executor = ToolExecutor::from_backend(Arc::new(client), &config)
        .context("Failed to build tool executor")?;
    tracing::info!(tools = executor.registry().len(), "Tools registered");

    let auth = ApiKeyAuth::new(config.auth.resolve_api_key());

    HttpServer::new(
        config.server.host.clone(),
        config.server.port,
        executor,
        auth,
    )
    .run()
    .await
    .context("Tool gateway stopped with an error")
}
