use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::commands::{
    AskCommand, ChatCommand, ContextCommand, FinanceCommand, ForecastCommand, HrCommand,
    InvoiceCommand, SalesCommand,
};
use cli::AppContext;
use common::{init_structured_logging, LoggingConfig};
use console::style;
use std::path::PathBuf;
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "erp-assist")]
#[command(about = "Ask questions about your company's ERP data")]
#[command(version)]
struct Cli {
    /// Use the offline stand-in instead of the completion service
    #[arg(long, global = true)]
    offline: bool,

    /// Dataset JSON to load instead of the bundled one (also ERP_DATASET)
    #[arg(long, global = true, value_name = "PATH")]
    dataset: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a single question
    Ask(AskCommand),
    /// Interactive chat (default)
    Chat(ChatCommand),
    /// Show the context a question would use, without sending it
    Context(ContextCommand),
    /// Sales overview computed from the dataset
    Sales(SalesCommand),
    /// Income, expenses and cash flow from the ledger
    Finance(FinanceCommand),
    /// Employee lookup and HR requests
    Hr(HrCommand),
    /// Generate an invoice
    Invoice(InvoiceCommand),
    /// Three-month sales forecast
    Forecast(ForecastCommand),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {:#}", style("error:").red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level(Level::DEBUG);
    }
    if cli.log_json {
        logging.json_output = true;
    }
    init_structured_logging(logging)?;

    let app = AppContext::load(cli.dataset, cli.offline)?;
    debug!(gateway = ?app.gateway, offline = app.offline, "Configuration loaded");

    match cli.command {
        Some(Commands::Ask(cmd)) => cmd.execute(&app).await,
        Some(Commands::Chat(cmd)) => cmd.execute(&app).await,
        Some(Commands::Context(cmd)) => cmd.execute(&app),
        Some(Commands::Sales(cmd)) => cmd.execute(&app),
        Some(Commands::Finance(cmd)) => cmd.execute(&app).await,
        Some(Commands::Hr(cmd)) => cmd.execute(&app).await,
        Some(Commands::Invoice(cmd)) => cmd.execute(&app).await,
        Some(Commands::Forecast(cmd)) => cmd.execute(&app).await,
        None => {
            ChatCommand {
                section: Default::default(),
            }
            .execute(&app)
            .await
        }
    }
}
