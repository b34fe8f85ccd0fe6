use crate::app::AppContext;
use crate::progress::ProgressBuilder;
use crate::render;
use anyhow::{Context, Result};
use application::{forecast_months, ReportService, FORECAST_MONTHS};
use clap::Args;

/// Three-month sales forecast written by the assistant
#[derive(Debug, Args)]
pub struct ForecastCommand {
    #[arg(long)]
    pub json: bool,
}

impl ForecastCommand {
    pub async fn execute(self, app: &AppContext) -> Result<()> {
        let provider = app.provider()?;
        let reports = ReportService::new(&app.dataset, provider, app.today());

        let months = forecast_months(&app.dataset, app.today(), FORECAST_MONTHS);
        let spinner = ProgressBuilder::report(&format!("Forecasting {}...", months.join(", ")));
        let result = reports.generate_forecast().await;
        match &result {
            Ok(_) => spinner.finish_and_clear(),
            Err(e) => spinner.finish_error(&e.to_string()),
        }
        let report = result.context("Failed to generate forecast")?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", render::forecast(&report));
        }
        Ok(())
    }
}
