//! Report DTOs handed back to the views

use domain::analytics::{
    inventory_status, monthly_sales, products_below_reorder, sales_metrics, top_products,
    InventoryStatus, MonthlySales, ProductPerformance, SalesMetrics, TOP_PRODUCTS_LIMIT,
};
use domain::finance::{
    finance_overview, ledger, monthly_cash_flow, FinanceOverview, LedgerEntry, MonthlyCashFlow,
};
use domain::hr::{LeaveDetails, RequestType};
use domain::invoice::{InvoiceLine, InvoiceTotals};
use domain::ErpDataset;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything the sales view shows without calling the gateway
#[derive(Debug, Clone, Serialize)]
pub struct SalesDashboard {
    pub metrics: SalesMetrics,
    pub top_products: Vec<ProductPerformance>,
    pub monthly: Vec<MonthlySales>,
    pub inventory: InventoryStatus,
    pub reorder_alerts: Vec<ReorderAlert>,
    pub recent_sales: Vec<RecentSale>,
}

pub const RECENT_SALES_LIMIT: usize = 5;

/// Latest transactions, newest first, with their payment status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentSale {
    pub sale_id: String,
    pub date: String,
    pub customer_name: String,
    pub product_name: String,
    pub amount: f64,
    pub status: &'static str,
}

/// Product at or below its reorder level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReorderAlert {
    pub product_id: String,
    pub product_name: String,
    pub stock_available: u32,
    pub reorder_level: u32,
}

impl SalesDashboard {
    pub fn build(data: &ErpDataset) -> Self {
        Self {
            metrics: sales_metrics(data),
            top_products: top_products(data, TOP_PRODUCTS_LIMIT),
            monthly: monthly_sales(data),
            inventory: inventory_status(data),
            reorder_alerts: products_below_reorder(data)
                .into_iter()
                .map(|p| ReorderAlert {
                    product_id: p.product_id.clone(),
                    product_name: p.product_name.clone(),
                    stock_available: p.stock_available,
                    reorder_level: p.reorder_level,
                })
                .collect(),
            recent_sales: recent_sales(data, RECENT_SALES_LIMIT),
        }
    }
}

fn recent_sales(data: &ErpDataset, limit: usize) -> Vec<RecentSale> {
    let mut sales: Vec<_> = data.sales_inventory.sales_transactions.iter().collect();
    // ISO dates sort lexically
    sales.sort_by(|a, b| b.date.cmp(&a.date));
    sales
        .into_iter()
        .take(limit)
        .map(|s| RecentSale {
            sale_id: s.sale_id.clone(),
            date: s.date.clone(),
            customer_name: s.customer_name.clone(),
            product_name: data.product_name(&s.product_id).to_string(),
            amount: s.net_amount,
            status: s.status_label(),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceReport {
    pub lines: Vec<InvoiceLine>,
    pub totals: InvoiceTotals,
    /// Document returned by the assistant
    pub document: Value,
}

impl InvoiceReport {
    /// `invoiceDetails.invoiceNumber` when the assistant supplied one
    pub fn invoice_number(&self) -> Option<&str> {
        self.document
            .get("invoiceDetails")
            .and_then(|d| d.get("invoiceNumber"))
            .and_then(Value::as_str)
    }
}

/// Extra input for an HR request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestDetails {
    Leave(LeaveDetails),
    Description { text: String },
}

impl RequestDetails {
    pub fn describe(&self) -> String {
        match self {
            RequestDetails::Leave(leave) => leave.describe(),
            RequestDetails::Description { text } => text.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HrRequestReport {
    pub employee_id: String,
    pub request_type: RequestType,
    /// `REQ/YYYY-MM/NNN`
    pub reference: String,
    pub document: Value,
}

impl HrRequestReport {
    pub fn title(&self) -> &str {
        self.document
            .get("report_title")
            .and_then(Value::as_str)
            .unwrap_or(self.request_type.label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub month: String,
    #[serde(rename = "predictedSales")]
    pub predicted_sales: f64,
    #[serde(default)]
    pub growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub forecast: Vec<ForecastPoint>,
    #[serde(default)]
    pub insights: Vec<String>,
}

/// Finance view figures, all computed from the fixture
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinanceDashboard {
    pub overview: FinanceOverview,
    pub monthly: Vec<MonthlyCashFlow>,
    /// Newest first, expenses negative
    pub transactions: Vec<LedgerEntry>,
}

impl FinanceDashboard {
    pub fn build(data: &ErpDataset) -> Self {
        Self {
            overview: finance_overview(data),
            monthly: monthly_cash_flow(data),
            transactions: ledger(data),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightMetric {
    pub label: String,
    #[serde(default)]
    pub value: Value,
}

/// One entry of the `insights` array the assistant writes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceInsight {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// positive, negative, neutral or warning
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub metrics: Vec<InsightMetric>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceInsights {
    pub insights: Vec<FinanceInsight>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinanceReport {
    pub dashboard: FinanceDashboard,
    pub insights: Vec<FinanceInsight>,
}
