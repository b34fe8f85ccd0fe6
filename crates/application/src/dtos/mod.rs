pub mod reports;

pub use reports::{
    FinanceDashboard, FinanceInsight, FinanceInsights, FinanceReport, ForecastPoint,
    ForecastReport, HrRequestReport, InsightMetric, InvoiceReport, RecentSale, ReorderAlert,
    RequestDetails, SalesDashboard, RECENT_SALES_LIMIT,
};
