use crate::app::AppContext;
use crate::commands::resolve_output;
use crate::progress::ProgressBuilder;
use crate::render;
use anyhow::{bail, Context, Result};
use application::{document_file_name, save_document, ReportService, RequestDetails};
use clap::builder::PossibleValuesParser;
use clap::Args;
use console::style;
use domain::analytics::format_inr;
use domain::hr::{
    available_request_types, leave_guidance, parse_date, LeaveDetails, LEAVE_TYPES,
};
use domain::DomainError;
use std::path::PathBuf;

/// Employee lookup and HR request documents
#[derive(Debug, Args)]
pub struct HrCommand {
    /// Employee ID, e.g. E002
    pub employee_id: String,

    /// Request type id to file (see the list printed without this flag)
    #[arg(short, long)]
    pub request: Option<String>,

    #[arg(long, value_parser = PossibleValuesParser::new(LEAVE_TYPES))]
    pub leave_type: Option<String>,

    /// First day of leave, YYYY-MM-DD
    #[arg(long)]
    pub from: Option<String>,

    /// Last day of leave, YYYY-MM-DD
    #[arg(long)]
    pub to: Option<String>,

    /// Reason for leave, or the request description for other types
    #[arg(short, long)]
    pub details: Option<String>,

    /// Save the generated document as JSON (file or directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl HrCommand {
    pub async fn execute(self, app: &AppContext) -> Result<()> {
        let Some(request_id) = self.request.as_deref() else {
            return self.show_employee(app);
        };

        let details = self.request_details(request_id)?;
        let provider = app.provider()?;
        let reports = ReportService::new(&app.dataset, provider, app.today());

        let spinner = ProgressBuilder::report("Preparing HR request...");
        let result = reports
            .generate_hr_request(&self.employee_id, request_id, &details)
            .await;
        match &result {
            Ok(_) => spinner.finish_and_clear(),
            Err(e) => spinner.finish_error(&e.to_string()),
        }
        let report = result.context("Failed to generate HR request")?;

        print!("{}", render::hr_request(&report));

        if let Some(output) = self.output {
            let path = resolve_output(
                output,
                &document_file_name(&[report.reference.as_str(), report.title()]),
            );
            save_document(&report.document, &path)?;
            println!("{} {}", style("Saved").green(), path.display());
        }
        Ok(())
    }

    fn request_details(&self, request_id: &str) -> Result<RequestDetails> {
        if request_id != "leave" {
            let text = self.details.clone().unwrap_or_default();
            return Ok(RequestDetails::Description { text });
        }

        let (Some(from), Some(to)) = (self.from.as_deref(), self.to.as_deref()) else {
            bail!("Leave requests need --from and --to (YYYY-MM-DD)");
        };
        Ok(RequestDetails::Leave(LeaveDetails {
            leave_type: self
                .leave_type
                .clone()
                .unwrap_or_else(|| LEAVE_TYPES[0].to_string()),
            from: parse_date(from)?,
            to: parse_date(to)?,
            reason: self.details.clone().unwrap_or_default(),
        }))
    }

    fn show_employee(&self, app: &AppContext) -> Result<()> {
        let employee = app
            .dataset
            .employee(&self.employee_id)
            .ok_or_else(|| DomainError::EmployeeNotFound(self.employee_id.clone()))?;
        let types = available_request_types(employee);

        println!("{}", style(&employee.name).bold().underlined());
        println!("  ID:          {}", employee.employee_id);
        println!("  Department:  {}", employee.department);
        println!("  Designation: {}", employee.designation);
        println!("  Joined:      {}", employee.join_date);
        println!("  Net salary:  {}", format_inr(employee.net_salary));

        println!("\n{}", style("Available requests").bold());
        for t in &types {
            println!("  {:<16} {} - {}", style(t.id).cyan(), t.label, t.description);
        }

        if let Some(leave_type) = self.leave_type.as_deref().and_then(leave_guidance) {
            println!("\n{}", style("Leave policy").bold());
            println!("  {}", leave_type.description);
            println!("  {}", style(leave_type.justification).dim());
        }
        Ok(())
    }
}
