use crate::app::AppContext;
use crate::render;
use anyhow::Result;
use clap::Args;
use domain::SectionScope;
use retrieval::ContextSelector;

/// Show the data a question would be answered from, without sending it
#[derive(Debug, Args)]
pub struct ContextCommand {
    pub query: String,

    #[arg(short, long, default_value = "all")]
    pub section: SectionScope,

    /// Earlier queries, most recent first
    #[arg(long = "history", value_name = "QUERY")]
    pub history: Vec<String>,

    /// Only print sections, score and keywords
    #[arg(long)]
    pub summary: bool,
}

impl ContextCommand {
    pub fn execute(self, app: &AppContext) -> Result<()> {
        let context =
            ContextSelector::new(&app.dataset).select(&self.query, self.section, &self.history);

        if self.summary {
            print!("{}", render::context(&context));
        } else {
            println!("{}", serde_json::to_string_pretty(&context)?);
        }
        Ok(())
    }
}
