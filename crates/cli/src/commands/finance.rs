use crate::app::AppContext;
use crate::progress::ProgressBuilder;
use crate::render;
use anyhow::{Context, Result};
use application::{FinanceDashboard, ReportService};
use clap::Args;

/// Income, expenses and cash flow, with optional assistant insights
#[derive(Debug, Args)]
pub struct FinanceCommand {
    /// Ask the assistant for insights on the figures
    #[arg(long)]
    pub insights: bool,

    #[arg(long)]
    pub json: bool,
}

impl FinanceCommand {
    pub async fn execute(self, app: &AppContext) -> Result<()> {
        if !self.insights {
            let dashboard = FinanceDashboard::build(&app.dataset);
            if self.json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            } else {
                print!("{}", render::finance(&dashboard));
            }
            return Ok(());
        }

        let provider = app.provider()?;
        let reports = ReportService::new(&app.dataset, provider, app.today());

        let spinner = ProgressBuilder::report("Analyzing financial data...");
        let result = reports.generate_finance_insights().await;
        match &result {
            Ok(_) => spinner.finish_and_clear(),
            Err(e) => spinner.finish_error(&e.to_string()),
        }
        let report = result.context("Failed to generate finance insights")?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", render::finance(&report.dashboard));
            println!();
            print!("{}", render::finance_insights(&report.insights));
        }
        Ok(())
    }
}
