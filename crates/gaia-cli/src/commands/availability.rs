//! `gaia check-availability` - One-off availability check from the command line.

use anyhow::{Context, Result};
use gaia_adapter_supabase::SupabaseClient;
use gaia_core::{AvailabilityQuery, GaiaConfig};
use gaia_scheduling::AvailabilityResolver;
use std::sync::Arc;

pub async fn check(config: &GaiaConfig, query: AvailabilityQuery) -> Result<()> {
    let client = SupabaseClient::from_config(config).context("Failed to configure upstream client")?;
    let resolver = AvailabilityResolver::new(Arc::new(client), &config.availability);

    let decision = resolver.check(&query).await?;
    println!("{}", serde_json::to_string_pretty(&decision)?);

    Ok(())
}
