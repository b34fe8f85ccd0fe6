//! Shared startup state for every command

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use domain::ErpDataset;
use llm::{provider_from_config, CompletionProvider, GatewayConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Fixture override read when `--dataset` is not given
pub const DATASET_ENV: &str = "ERP_DATASET";

pub struct AppContext {
    pub dataset: ErpDataset,
    pub gateway: GatewayConfig,
    pub offline: bool,
}

impl AppContext {
    /// Load the fixture (bundled unless overridden) and the gateway settings
    pub fn load(dataset_path: Option<PathBuf>, offline: bool) -> Result<Self> {
        let dataset_path =
            dataset_path.or_else(|| std::env::var_os(DATASET_ENV).map(PathBuf::from));

        let dataset = match &dataset_path {
            Some(path) => ErpDataset::from_path(path)
                .with_context(|| format!("Failed to load dataset from {}", path.display()))?,
            None => ErpDataset::bundled().context("Bundled dataset is invalid")?,
        };
        info!(
            company = %dataset.company_name,
            source = %dataset_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "bundled".to_string()),
            "Dataset loaded"
        );

        Ok(Self {
            dataset,
            gateway: GatewayConfig::from_env(),
            offline,
        })
    }

    pub fn provider(&self) -> Result<Arc<dyn CompletionProvider>> {
        provider_from_config(&self.gateway, self.offline)
            .context("Set GEMINI_API_KEY (or use --offline to run without the completion service)")
    }

    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
