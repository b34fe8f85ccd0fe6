//! Prompt construction
//!
//! Every builder here is pure: the date and anything random (reference
//! numbers) are passed in by the caller.

use crate::selector::RetrievalContext;
use chrono::NaiveDate;
use domain::finance::{FinanceOverview, MonthlyCashFlow};
use domain::invoice::{InvoiceDraft, InvoiceLine, InvoiceTotals};
use domain::{CompanyDetails, Employee, SalesTransaction};
use serde_json::json;

/// Builds the chat prompt around a retrieval context
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    company_name: String,
    today: NaiveDate,
}

impl PromptBuilder {
    pub fn new(company_name: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            company_name: company_name.into(),
            today,
        }
    }

    /// Embeds the whole of `context.data`, pretty printed
    pub fn build(&self, query: &str, context: &RetrievalContext<'_>) -> Result<String, serde_json::Error> {
        let context_json = serde_json::to_string_pretty(&context.data)?;

        Ok(format!(
            r#"
You are an AI assistant for an ERP (Enterprise Resource Planning) system for {company}.
Answer the following question based ONLY on the provided context data.
If you can't answer from the provided context, say so politely and suggest what information might help answer the question.

USER QUERY: {query}

CONTEXT DATA:
{context_json}

When answering:
1. Provide concise, accurate answers based only on the context data
2. Use specific numbers and facts from the context
3. For numerical data, include calculations when appropriate
4. Format currency values as ₹XX,XXX (Indian Rupees)
5. Format lists and tables for easy reading using markdown
6. If query asks for comparisons or trends, include relevant data in a structured format suitable for visualization

Response should be in the following JSON format:
{{
  "text": "Your detailed answer here, formatted with markdown",
  "data": {{}} (optional: include any structured data that could be visualized as charts or tables)
}}

For the "data" field, use appropriate structure for visualization:
- For tables: {{"type": "table", "headers": [...], "rows": [...]}}
- For pie charts: {{"type": "pie", "labels": [...], "values": [...]}}
- For bar charts: {{"type": "bar", "labels": [...], "values": [...]}}
- For line charts: {{"type": "line", "labels": [...], "series": [...]}}

Current date for reference: {today}
"#,
            company = self.company_name,
            today = self.today.format("%Y-%m-%d"),
        ))
    }
}

/// Invoice document request; totals are computed locally and passed through as-is
pub fn invoice_prompt(
    company: &CompanyDetails,
    draft: &InvoiceDraft,
    lines: &[InvoiceLine],
    totals: &InvoiceTotals,
    today: NaiveDate,
) -> Result<String, serde_json::Error> {
    let payload = json!({
        "invoiceDetails": {
            "invoiceNumber": "Generate a unique invoice number",
            "date": today.format("%Y-%m-%d").to_string(),
            "dueDate": "Net 30 days",
            "status": "Unpaid"
        },
        "companyDetails": company,
        "customerDetails": {
            "name": draft.customer.name,
            "type": draft.customer.customer_type,
            "email": draft.customer.email,
            "phone": draft.customer.phone,
            "address": draft.customer.address
        },
        "products": lines,
        "paymentDetails": {
            "subtotal": totals.subtotal,
            "gstAmount": totals.gst_amount,
            "total": totals.total,
            "paymentMode": draft.payment_mode
        },
        "additionalNotes": draft.notes,
        "terms": ["Generate 3-4 standard invoice terms and conditions"]
    });

    Ok(format!(
        "Generate a detailed invoice in JSON format based on the following information:\n{}",
        serde_json::to_string_pretty(&payload)?
    ))
}

/// HR request document
pub fn hr_request_prompt(
    employee: &Employee,
    request_label: &str,
    request_details: &str,
    company: &CompanyDetails,
    reference: &str,
) -> Result<String, serde_json::Error> {
    let company_json = serde_json::to_string(company)?;

    Ok(format!(
        r#"Generate a professional HR report/request based on the following information:

Employee Information:
- Name: {name}
- Employee ID: {id}
- Department: {department}
- Designation: {designation}
- Join Date: {join_date}
- Current Salary: ₹{salary}

Request Type: {request_label}
Request Details: {request_details}

Company Details: {company_json}

Generate a detailed and formal request document that includes:
1. A professional header with company name and date
2. Request reference number ({reference})
3. Employee information section
4. Request details with proper formatting
5. Any relevant company policies for this type of request
6. Next steps in the approval process
7. Required signatures and approvals
8. Expected timeline for response
9. A professional closing

Format the response as JSON with the following structure:
{{
  "report_title": "Title for this report/request",
  "reference_number": "Generated reference number",
  "date": "Current date",
  "employee_details": {{
    "name": "Employee name",
    "id": "Employee ID",
    "department": "Department",
    "designation": "Designation"
  }},
  "request": {{
    "type": "Type of request",
    "description": "Detailed description",
    "justification": "Reasons or justification"
  }},
  "process": {{
    "approval_chain": ["List of approvers needed"],
    "estimated_timeline": "Expected timeline",
    "requirements": ["Any additional required documents or information"]
  }},
  "policies": ["Relevant company policies"],
  "additional_notes": "Any additional important information"
}}"#,
        name = employee.name,
        id = employee.employee_id,
        department = employee.department,
        designation = employee.designation,
        join_date = employee.join_date,
        salary = employee.net_salary,
    ))
}

/// Three-month forecast over the raw sales transactions
pub fn forecast_prompt(sales: &[SalesTransaction], months: &[String]) -> Result<String, serde_json::Error> {
    let sales_json = serde_json::to_string(sales)?;
    let example_rows = months
        .iter()
        .map(|m| format!(r#"    {{ "month": "{m}", "predictedSales": NUMBER, "growth": NUMBER }}"#))
        .collect::<Vec<_>>()
        .join(",\n");

    Ok(format!(
        r#"Based on this historical sales data from our electronics store, please provide a {count}-month sales forecast
and identify key trends or insights. Format your response as JSON with 'forecast' and 'insights' fields:

{sales_json}

Return a JSON object with the following structure:
{{
  "forecast": [
{example_rows}
  ],
  "insights": [
    "First key insight or trend",
    "Second key insight or trend",
    "Third key insight or trend"
  ]
}}

Make predictions based on the data patterns you observe. Only respond with the JSON."#,
        count = months.len(),
    ))
}

/// Finance insights over locally computed totals
pub fn finance_insights_prompt(
    company_name: &str,
    overview: &FinanceOverview,
    monthly: &[MonthlyCashFlow],
) -> Result<String, serde_json::Error> {
    let monthly_json = serde_json::to_string(monthly)?;

    Ok(format!(
        r#"Analyze this financial data for {company_name} and provide comprehensive business insights:

Total Income: {income:.0}
Total Expenses: {expenses:.0}
Net Profit: {net:.0}

Financial Ratios:
- Net Profit Margin: {margin:.1}%
- Operating Expense Ratio: {expense_ratio:.1}%

Monthly Cash Flow:
{monthly_json}

Generate 4-5 detailed insights covering:
1. Financial Health Analysis
2. Growth Trends
3. Risk Factors
4. Optimization Opportunities
5. Cash Flow Management

Format as JSON with structure:
{{
    "insights": [
        {{
            "title": "Insight title",
            "description": "Detailed explanation",
            "type": "positive/negative/neutral/warning",
            "category": "Health/Growth/Risk/Optimization/Cash Flow",
            "impact": "high/medium/low",
            "metrics": [
                {{"label": "Key Metric", "value": "Value"}}
            ],
            "recommendations": ["Action item 1", "Action item 2"]
        }}
    ]
}}"#,
        income = overview.income,
        expenses = overview.expenses,
        net = overview.net_profit,
        margin = overview.profit_margin,
        expense_ratio = overview.expense_ratio,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::ContextSelector;
    use domain::{ErpDataset, SectionScope};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 2).expect("valid date")
    }

    #[test]
    fn test_prompt_embeds_full_context_and_query() {
        let data = ErpDataset::bundled().expect("fixture");
        let ctx = ContextSelector::new(&data).select("employee list", SectionScope::All, &[]);
        let prompt = PromptBuilder::new(&data.company_name, today())
            .build("employee list", &ctx)
            .expect("prompt");

        assert!(prompt.contains("USER QUERY: employee list"));
        assert!(prompt.contains("Info Electronics Pvt Ltd"));
        assert!(prompt.contains("Current date for reference: 2024-04-02"));
        let pretty = serde_json::to_string_pretty(&ctx.data).expect("json");
        assert!(prompt.contains(&pretty));
        for employee in &data.hr_payroll.employees {
            assert!(prompt.contains(&employee.name));
        }
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let data = ErpDataset::bundled().expect("fixture");
        let selector = ContextSelector::new(&data);
        let builder = PromptBuilder::new(&data.company_name, today());
        let a = builder
            .build("sales", &selector.select("sales", SectionScope::All, &[]))
            .expect("prompt");
        let b = builder
            .build("sales", &selector.select("sales", SectionScope::All, &[]))
            .expect("prompt");
        assert_eq!(a, b);
    }

    #[test]
    fn test_forecast_prompt_lists_months() {
        let data = ErpDataset::bundled().expect("fixture");
        let months = vec![
            "April 2024".to_string(),
            "May 2024".to_string(),
            "June 2024".to_string(),
        ];
        let prompt = forecast_prompt(&data.sales_inventory.sales_transactions, &months)
            .expect("prompt");
        assert!(prompt.contains("3-month sales forecast"));
        assert!(prompt.contains(r#""month": "June 2024""#));
        assert!(prompt.contains("S1001"));
    }

    #[test]
    fn test_hr_prompt_carries_employee_and_reference() {
        let data = ErpDataset::bundled().expect("fixture");
        let employee = data.employee("E003").expect("employee");
        let prompt = hr_request_prompt(
            employee,
            "Leave Request",
            "Leave Type: Sick Leave",
            &data.company_details,
            "REQ/2024-04/123",
        )
        .expect("prompt");
        assert!(prompt.contains(&format!("- Employee ID: {}", employee.employee_id)));
        assert!(prompt.contains("Request Type: Leave Request"));
        assert!(prompt.contains("REQ/2024-04/123"));
    }

    #[test]
    fn test_finance_prompt_carries_local_totals() {
        let data = ErpDataset::bundled().expect("fixture");
        let overview = domain::finance::finance_overview(&data);
        let monthly = domain::finance::monthly_cash_flow(&data);

        let prompt =
            finance_insights_prompt(&data.company_name, &overview, &monthly).expect("prompt");
        assert!(prompt.contains("Info Electronics Pvt Ltd"));
        assert!(prompt.contains("Total Income: 660300"));
        assert!(prompt.contains("Net Profit: -292600"));
        assert!(prompt.contains(r#""month":"2024-02""#));
        assert!(prompt.contains(r#""insights": ["#));
    }
}
