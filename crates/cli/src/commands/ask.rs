use crate::app::AppContext;
use crate::progress::ProgressBuilder;
use crate::render;
use anyhow::{bail, Result};
use application::AssistantService;
use clap::Args;
use domain::{ChatSession, SectionScope, Sender, TurnContent};

/// One question, one answer
#[derive(Debug, Args)]
pub struct AskCommand {
    /// Question about the company data
    pub query: String,

    /// Restrict context to one section (all, company, sales, purchase, finance, hr)
    #[arg(short, long, default_value = "all")]
    pub section: SectionScope,

    /// Print the sections and keywords the answer was based on
    #[arg(long)]
    pub show_context: bool,

    /// Print the assistant turns as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    pub async fn execute(self, app: &AppContext) -> Result<()> {
        let provider = app.provider()?;
        let service = AssistantService::new(&app.dataset, provider, app.today());

        let spinner = ProgressBuilder::gateway("Asking the assistant...");
        let session = service
            .handle_query(ChatSession::new(self.section), &self.query)
            .await;
        spinner.finish_and_clear();

        let replies: Vec<_> = session
            .turns()
            .iter()
            .filter(|t| t.sender == Sender::Assistant && !t.is_welcome())
            .collect();

        if self.show_context {
            if let Some(summary) = session.last_context() {
                eprintln!(
                    "context: sections={} score={} keywords={}",
                    summary.sections.join(","),
                    summary.relevance_score,
                    summary.keywords.join(",")
                );
            }
        }

        if let Some(TurnContent::Error { content }) = replies.last().map(|t| &t.content) {
            bail!("{}", content);
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&replies)?);
        } else {
            for turn in replies {
                println!("{}", render::turn(turn));
            }
        }
        Ok(())
    }
}
