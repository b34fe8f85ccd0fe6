use crate::app::AppContext;
use crate::commands::resolve_output;
use crate::progress::ProgressBuilder;
use crate::render;
use anyhow::{Context, Result};
use application::{document_file_name, save_document, ReportService};
use clap::builder::PossibleValuesParser;
use clap::Args;
use console::style;
use domain::invoice::{CustomerInfo, InvoiceDraft, InvoiceItem, PAYMENT_MODES};
use std::path::PathBuf;

/// Invoice with locally computed totals
#[derive(Debug, Args)]
pub struct InvoiceCommand {
    #[arg(long)]
    pub customer: String,

    #[arg(long, default_value = "Individual")]
    pub customer_type: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long, default_value = "")]
    pub address: String,

    /// Line item as PRODUCT_ID:QTY, repeatable
    #[arg(short, long = "item", value_name = "PRODUCT_ID:QTY", value_parser = parse_item, required = true)]
    pub items: Vec<InvoiceItem>,

    #[arg(long, default_value = "Credit Card", value_parser = PossibleValuesParser::new(PAYMENT_MODES))]
    pub payment: String,

    #[arg(long, default_value = "")]
    pub notes: String,

    /// Save the generated document as JSON (file or directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn parse_item(value: &str) -> Result<InvoiceItem, String> {
    let (product_id, quantity) = value
        .split_once(':')
        .ok_or_else(|| format!("expected PRODUCT_ID:QTY, got '{value}'"))?;
    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid quantity in '{value}'"))?;
    Ok(InvoiceItem {
        product_id: product_id.trim().to_uppercase(),
        quantity,
    })
}

impl InvoiceCommand {
    pub async fn execute(self, app: &AppContext) -> Result<()> {
        let draft = InvoiceDraft {
            customer: CustomerInfo {
                name: self.customer,
                customer_type: self.customer_type,
                email: self.email,
                phone: self.phone,
                address: self.address,
            },
            items: self.items,
            payment_mode: self.payment,
            notes: self.notes,
        };

        let provider = app.provider()?;
        let reports = ReportService::new(&app.dataset, provider, app.today());

        let spinner = ProgressBuilder::report("Generating invoice...");
        let result = reports.generate_invoice(&draft).await;
        match &result {
            Ok(_) => spinner.finish_and_clear(),
            Err(e) => spinner.finish_error(&e.to_string()),
        }
        let report = result.context("Failed to generate invoice")?;

        print!("{}", render::invoice(&report));

        if let Some(output) = self.output {
            let number = report.invoice_number().unwrap_or("draft");
            let path = resolve_output(output, &document_file_name(&["Invoice", number]));
            save_document(&report, &path)?;
            println!("{} {}", style("Saved").green(), path.display());
        }
        Ok(())
    }
}
