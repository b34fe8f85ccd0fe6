use crate::app::AppContext;
use crate::render;
use anyhow::Result;
use application::SalesDashboard;
use clap::Args;

/// Sales metrics, top products, monthly totals and stock levels
#[derive(Debug, Args)]
pub struct SalesCommand {
    #[arg(long)]
    pub json: bool,
}

impl SalesCommand {
    pub fn execute(self, app: &AppContext) -> Result<()> {
        let dashboard = SalesDashboard::build(&app.dataset);
        if self.json {
            println!("{}", serde_json::to_string_pretty(&dashboard)?);
        } else {
            print!("{}", render::dashboard(&dashboard));
        }
        Ok(())
    }
}
