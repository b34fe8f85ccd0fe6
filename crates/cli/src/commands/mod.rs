pub mod ask;
pub mod chat;
pub mod context;
pub mod finance;
pub mod forecast;
pub mod hr;
pub mod invoice;
pub mod sales;

pub use ask::AskCommand;
pub use chat::{ChatCommand, ChatInput};
pub use context::ContextCommand;
pub use finance::FinanceCommand;
pub use forecast::ForecastCommand;
pub use hr::HrCommand;
pub use invoice::InvoiceCommand;
pub use sales::SalesCommand;

use std::path::PathBuf;

/// A directory gets `file_name` appended; anything else is used as is
pub(crate) fn resolve_output(output: PathBuf, file_name: &str) -> PathBuf {
    if output.is_dir() {
        output.join(file_name)
    } else {
        output
    }
}
