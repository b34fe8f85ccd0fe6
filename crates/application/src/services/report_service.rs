use crate::dtos::{
    FinanceDashboard, FinanceInsights, FinanceReport, ForecastReport, HrRequestReport,
    InvoiceReport, RequestDetails, SalesDashboard,
};
use crate::errors::{ApplicationError, ApplicationResult};
use chrono::{Datelike, Months, NaiveDate};
use common::OperationTimer;
use domain::analytics::monthly_sales;
use domain::hr::{available_request_types, find_request_type, RequestType};
use domain::invoice::InvoiceDraft;
use domain::{DomainError, Employee, ErpDataset};
use llm::CompletionProvider;
use retrieval::{
    finance_insights_prompt, forecast_prompt, hr_request_prompt, invoice_prompt, parse_response,
    ParsedResponse,
};
use serde_json::Value;
use tracing::{debug, info};

/// Months covered by a sales forecast
pub const FORECAST_MONTHS: usize = 3;

/// Report Service
///
/// Invoice, HR request, forecast and finance insight documents. Figures are
/// computed locally; the gateway only writes the document around them.
pub struct ReportService<'a, P> {
    data: &'a ErpDataset,
    provider: P,
    today: NaiveDate,
}

impl<'a, P: CompletionProvider> ReportService<'a, P> {
    pub fn new(data: &'a ErpDataset, provider: P, today: NaiveDate) -> Self {
        Self {
            data,
            provider,
            today,
        }
    }

    pub fn sales_dashboard(&self) -> SalesDashboard {
        SalesDashboard::build(self.data)
    }

    pub fn finance_dashboard(&self) -> FinanceDashboard {
        FinanceDashboard::build(self.data)
    }

    pub fn employee(&self, employee_id: &str) -> ApplicationResult<&'a Employee> {
        self.data
            .employee(employee_id)
            .ok_or_else(|| DomainError::EmployeeNotFound(employee_id.to_string()).into())
    }

    pub fn request_types(&self, employee_id: &str) -> ApplicationResult<Vec<RequestType>> {
        Ok(available_request_types(self.employee(employee_id)?))
    }

    pub async fn generate_invoice(&self, draft: &InvoiceDraft) -> ApplicationResult<InvoiceReport> {
        draft.validate()?;

        let mut timer = OperationTimer::new("report.invoice");
        let lines = draft.lines(self.data);
        let totals = draft.totals(self.data);
        timer.add_field("items_count", lines.len());

        let prompt = invoice_prompt(&self.data.company_details, draft, &lines, &totals, self.today)?;
        let result = self.document(&prompt).await;
        timer.finish_with_result(&result);

        Ok(InvoiceReport {
            lines,
            totals,
            document: result?,
        })
    }

    pub async fn generate_hr_request(
        &self,
        employee_id: &str,
        request_type_id: &str,
        details: &RequestDetails,
    ) -> ApplicationResult<HrRequestReport> {
        let employee = self.employee(employee_id)?;
        let request_type = find_request_type(employee, request_type_id)
            .ok_or_else(|| ApplicationError::not_found("Request type", request_type_id))?;

        let description = details.describe();
        if description.is_empty() {
            return Err(DomainError::MissingField("request details").into());
        }

        let mut timer = OperationTimer::new("report.hr_request");
        timer.add_field("request_type", request_type.id);

        let reference = reference_number(self.today, uuid::Uuid::new_v4());
        let prompt = hr_request_prompt(
            employee,
            request_type.label,
            &description,
            &self.data.company_details,
            &reference,
        )?;
        let result = self.document(&prompt).await;
        timer.finish_with_result(&result);

        info!(employee = %employee.employee_id, reference = %reference, "HR request generated");
        Ok(HrRequestReport {
            employee_id: employee.employee_id.clone(),
            request_type,
            reference,
            document: result?,
        })
    }

    pub async fn generate_forecast(&self) -> ApplicationResult<ForecastReport> {
        let months = forecast_months(self.data, self.today, FORECAST_MONTHS);
        let prompt = forecast_prompt(&self.data.sales_inventory.sales_transactions, &months)?;

        let timer = OperationTimer::new("report.forecast");
        let result = self.document(&prompt).await;
        timer.finish_with_result(&result);

        serde_json::from_value(result?).map_err(|e| ApplicationError::UnexpectedReply {
            message: format!("forecast document: {e}"),
        })
    }

    pub async fn generate_finance_insights(&self) -> ApplicationResult<FinanceReport> {
        let dashboard = self.finance_dashboard();
        let prompt = finance_insights_prompt(
            &self.data.company_name,
            &dashboard.overview,
            &dashboard.monthly,
        )?;

        let mut timer = OperationTimer::new("report.finance_insights");
        timer.add_field("transactions", dashboard.overview.transaction_count);
        let result = self.document(&prompt).await;
        timer.finish_with_result(&result);

        let document: FinanceInsights =
            serde_json::from_value(result?).map_err(|e| ApplicationError::UnexpectedReply {
                message: format!("finance insights document: {e}"),
            })?;
        Ok(FinanceReport {
            dashboard,
            insights: document.insights,
        })
    }

    /// Completion text as a JSON document; prose-only replies are rejected
    async fn document(&self, prompt: &str) -> ApplicationResult<Value> {
        let raw = self.provider.complete(prompt).await?;
        match parse_response(&raw) {
            ParsedResponse::Structured(value) => Ok(value),
            ParsedResponse::PlainText(text) => {
                debug!(reply_chars = text.len(), "Reply carried no JSON document");
                Err(ApplicationError::UnexpectedReply {
                    message: "no JSON document in reply".to_string(),
                })
            }
        }
    }
}

/// `REQ/YYYY-MM/NNN` with NNN in `100..=999`
pub fn reference_number(today: NaiveDate, id: uuid::Uuid) -> String {
    let serial = 100 + (id.as_u128() % 900) as u32;
    format!("REQ/{}-{:02}/{}", today.year(), today.month(), serial)
}

/// The `count` months following the latest sale, e.g. `April 2024`.
/// Starts after the current month when there are no sales.
pub fn forecast_months(data: &ErpDataset, today: NaiveDate, count: usize) -> Vec<String> {
    let last = monthly_sales(data)
        .last()
        .and_then(|m| NaiveDate::parse_from_str(&format!("{}-01", m.month), "%Y-%m-%d").ok())
        .unwrap_or(today);
    let first_of_month = last.with_day(1).unwrap_or(last);

    (1..=count as u32)
        .filter_map(|offset| first_of_month.checked_add_months(Months::new(offset)))
        .map(|month| month.format("%B %Y").to_string())
        .collect()
}
