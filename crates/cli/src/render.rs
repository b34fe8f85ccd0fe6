//! Terminal rendering of turns, charts and reports

use application::{
    FinanceDashboard, FinanceInsight, ForecastReport, HrRequestReport, InvoiceReport,
    SalesDashboard,
};
use console::style;
use prettytable::format::consts::FORMAT_NO_LINESEP_WITH_TITLE;
use prettytable::{row, Cell, Row, Table};
use domain::analytics::format_inr;
use domain::{ConversationTurn, Sender, TurnContent};
use retrieval::{RetrievalContext, Visualization};
use serde_json::Value;
use std::fmt::Write as _;

const BAR_WIDTH: f64 = 30.0;

pub fn turn(turn: &ConversationTurn) -> String {
    let time = turn.timestamp.with_timezone(&chrono::Local).format("%H:%M");
    match (&turn.sender, &turn.content) {
        (Sender::User, content) => format!(
            "{} {}",
            style(format!("[You {time}]")).green().bold(),
            content.as_text()
        ),
        (_, TurnContent::Error { content }) => {
            format!("{} {}", style("[!]").red().bold(), style(content).red())
        }
        (_, TurnContent::Visualization {
            content,
            visualization_type,
        }) => format!(
            "{}\n{}",
            style(format!("[Chart: {visualization_type:?}]")).magenta(),
            visualization(content)
        ),
        (_, content) => format!(
            "{} {}",
            style(format!("[Assistant {time}]")).cyan().bold(),
            content.as_text()
        ),
    }
}

/// Text rendering of a `data` payload; unknown shapes are pretty-printed
pub fn visualization(value: &Value) -> String {
    match serde_json::from_value::<Visualization>(value.clone()) {
        Ok(Visualization::Table { headers, rows }) => table(&headers, &rows),
        Ok(Visualization::Pie { labels, values }) => {
            let total: f64 = values.iter().sum();
            let mut out = String::new();
            for (label, v) in labels.iter().zip(&values) {
                let share = if total > 0.0 { v / total * 100.0 } else { 0.0 };
                let _ = writeln!(out, "  {label}: {} ({share:.1}%)", number(*v));
            }
            out
        }
        Ok(Visualization::Bar { labels, values }) => bars(&labels, &values),
        Ok(Visualization::Line { labels, series }) => line(&labels, &series),
        Err(_) => serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn number(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

fn new_table(titles: Row) -> Table {
    let mut table = Table::new();
    table.set_format(*FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(titles);
    table
}

/// Indent a rendered table to line up with the surrounding text
fn indented(table: &Table) -> String {
    let mut out = String::new();
    for line in table.to_string().lines() {
        let _ = writeln!(out, "  {line}");
    }
    out
}

fn table(headers: &[String], rows: &[Vec<Value>]) -> String {
    let mut table = new_table(Row::new(headers.iter().map(|h| Cell::new(h)).collect()));
    for values in rows {
        table.add_row(Row::new(values.iter().map(|v| Cell::new(&cell(v))).collect()));
    }
    indented(&table)
}

fn bars(labels: &[String], values: &[f64]) -> String {
    let max = values.iter().cloned().fold(0.0_f64, f64::max);
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for (label, v) in labels.iter().zip(values) {
        let len = if max > 0.0 {
            (v / max * BAR_WIDTH).round() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "  {label:<label_width$} {} {}",
            style("█".repeat(len)).blue(),
            number(*v)
        );
    }
    out
}

/// `series` entries are either numbers or `{ "label"/"name", "data": [...] }`
fn line(labels: &[String], series: &[Value]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {}", labels.join(" → "));

    if series.iter().all(Value::is_number) {
        let values: Vec<f64> = series.iter().filter_map(Value::as_f64).collect();
        return out + &bars(labels, &values);
    }

    for (i, s) in series.iter().enumerate() {
        let name = s
            .get("label")
            .or_else(|| s.get("name"))
            .map(cell)
            .unwrap_or_else(|| format!("Series {}", i + 1));
        let points = s
            .get("data")
            .and_then(Value::as_array)
            .map(|data| data.iter().map(cell).collect::<Vec<_>>().join(", "))
            .unwrap_or_else(|| cell(s));
        let _ = writeln!(out, "  {name}: {points}");
    }
    out
}

pub fn context(ctx: &RetrievalContext<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} (score {})",
        style("Sections:").bold(),
        ctx.sections.join(", "),
        ctx.relevance_score
    );
    let _ = writeln!(out, "{} {}", style("Keywords:").bold(), ctx.keywords.join(", "));
    out
}

pub fn dashboard(d: &SalesDashboard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", style("Sales overview").bold().underlined());
    let _ = writeln!(out, "  Total sales:     {}", format_inr(d.metrics.total_sales));
    let _ = writeln!(out, "  Orders:          {}", d.metrics.total_orders);
    let _ = writeln!(out, "  Average order:   {}", format_inr(d.metrics.average_order));
    let _ = writeln!(out, "  Inventory value: {}", format_inr(d.metrics.inventory_value));

    let _ = writeln!(out, "\n{}", style("Top products").bold().underlined());
    let mut top = new_table(row!["#", "Product", r->"Sold", r->"Revenue"]);
    for (rank, p) in d.top_products.iter().enumerate() {
        top.add_row(row![rank + 1, p.name, r->p.quantity, r->format_inr(p.revenue)]);
    }
    out.push_str(&indented(&top));

    let _ = writeln!(out, "\n{}", style("Monthly sales").bold().underlined());
    let labels: Vec<String> = d.monthly.iter().map(|m| m.month.clone()).collect();
    let totals: Vec<f64> = d.monthly.iter().map(|m| m.total).collect();
    out.push_str(&bars(&labels, &totals));

    let _ = writeln!(out, "\n{}", style("Inventory status").bold().underlined());
    let _ = writeln!(
        out,
        "  In stock: {}  Low: {}  Critical: {}",
        d.inventory.in_stock, d.inventory.low, d.inventory.critical
    );
    if !d.reorder_alerts.is_empty() {
        let _ = writeln!(out, "  {}", style("Reorder now").red().bold());
        let mut alerts = new_table(row!["ID", "Product", r->"Stock", r->"Reorder level"]);
        for alert in &d.reorder_alerts {
            alerts.add_row(row![
                alert.product_id,
                alert.product_name,
                r->alert.stock_available,
                r->alert.reorder_level
            ]);
        }
        out.push_str(&indented(&alerts));
    }

    let _ = writeln!(out, "\n{}", style("Recent sales").bold().underlined());
    let mut recent = new_table(row!["Sale", "Date", "Customer", "Product", r->"Amount", "Status"]);
    for sale in &d.recent_sales {
        recent.add_row(row![
            sale.sale_id,
            sale.date,
            sale.customer_name,
            sale.product_name,
            r->format_inr(sale.amount),
            sale.status
        ]);
    }
    out.push_str(&indented(&recent));
    out
}

pub fn invoice(report: &InvoiceReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        style("Invoice").bold().underlined(),
        report.invoice_number().unwrap_or("")
    );
    let mut lines = new_table(row!["Product", r->"Qty", r->"Unit price", r->"GST %", r->"Amount"]);
    for line in &report.lines {
        lines.add_row(row![
            line.product_name,
            r->line.quantity,
            r->format_inr(line.unit_price),
            r->number(line.gst_percent),
            r->format_inr(line.item_total)
        ]);
    }
    out.push_str(&indented(&lines));
    let _ = writeln!(out, "  Subtotal: {}", format_inr(report.totals.subtotal));
    let _ = writeln!(out, "  GST:      {}", format_inr(report.totals.gst_amount));
    let _ = writeln!(
        out,
        "  {}",
        style(format!("Total:    {}", format_inr(report.totals.total))).bold()
    );
    out
}

pub fn hr_request(report: &HrRequestReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", style(report.title()).bold().underlined());
    let _ = writeln!(out, "  Reference: {}", report.reference);
    let _ = writeln!(out, "  Employee:  {}", report.employee_id);
    let _ = writeln!(out, "  Type:      {}", report.request_type.label);
    let _ = writeln!(
        out,
        "{}",
        serde_json::to_string_pretty(&report.document).unwrap_or_default()
    );
    out
}

pub fn forecast(report: &ForecastReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", style("Sales forecast").bold().underlined());
    let mut points = new_table(row!["Month", r->"Predicted sales", r->"Growth"]);
    for point in &report.forecast {
        points.add_row(row![
            point.month,
            r->format_inr(point.predicted_sales),
            r->format!("{:+.1}%", point.growth)
        ]);
    }
    out.push_str(&indented(&points));
    if !report.insights.is_empty() {
        let _ = writeln!(out, "\n{}", style("Insights").bold());
        for insight in &report.insights {
            let _ = writeln!(out, "  • {insight}");
        }
    }
    out
}

pub fn finance(d: &FinanceDashboard) -> String {
    let o = &d.overview;
    let mut out = String::new();
    let _ = writeln!(out, "{}", style("Financial overview").bold().underlined());
    let _ = writeln!(out, "  Income:        {}", format_inr(o.income));
    let _ = writeln!(out, "  Expenses:      {}", format_inr(o.expenses));
    let net = format!("  Net profit:    {}", format_inr(o.net_profit));
    if o.net_profit < 0.0 {
        let _ = writeln!(out, "{}", style(net).red());
    } else {
        let _ = writeln!(out, "{}", style(net).green());
    }
    let _ = writeln!(out, "  Profit margin: {:.1}%", o.profit_margin);
    let _ = writeln!(out, "  Expense ratio: {:.1}%", o.expense_ratio);

    let _ = writeln!(out, "\n{}", style("Monthly cash flow").bold().underlined());
    let mut monthly = new_table(row!["Month", r->"Income", r->"Expenses", r->"Net"]);
    for m in &d.monthly {
        monthly.add_row(row![
            m.month,
            r->format_inr(m.income),
            r->format_inr(m.expenses),
            r->format_inr(m.net())
        ]);
    }
    out.push_str(&indented(&monthly));

    let _ = writeln!(out, "\n{}", style("Transactions").bold().underlined());
    let mut ledger = new_table(row!["ID", "Date", "Description", "Mode", r->"Amount"]);
    for entry in &d.transactions {
        ledger.add_row(row![
            entry.transaction_id,
            entry.date,
            entry.description,
            entry.mode,
            r->format_inr(entry.amount)
        ]);
    }
    out.push_str(&indented(&ledger));
    out
}

pub fn finance_insights(insights: &[FinanceInsight]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", style("Insights").bold().underlined());
    for insight in insights {
        let marker = match insight.kind.as_str() {
            "positive" => style("+").green().bold(),
            "negative" => style("-").red().bold(),
            "warning" => style("!").yellow().bold(),
            _ => style("•").dim(),
        };
        let _ = writeln!(
            out,
            "\n  {marker} {} [{} / {} impact]",
            style(&insight.title).bold(),
            insight.category,
            insight.impact
        );
        if !insight.description.is_empty() {
            let _ = writeln!(out, "    {}", insight.description);
        }
        for metric in &insight.metrics {
            let _ = writeln!(out, "    {}: {}", metric.label, cell(&metric.value));
        }
        for rec in &insight.recommendations {
            let _ = writeln!(out, "    -> {rec}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plain(s: String) -> String {
        console::strip_ansi_codes(&s).to_string()
    }

    #[test]
    fn test_table_rows_share_width() {
        let out = plain(visualization(&json!({
            "type": "table",
            "headers": ["Name", "Salary"],
            "rows": [["Rajesh Kumar", 150000], ["Amit", null]]
        })));
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines.iter().any(|l| l.contains("Name") && l.contains("Salary")));
        assert!(lines.iter().any(|l| l.contains("Rajesh Kumar") && l.contains("150000")));
        assert!(lines.iter().any(|l| l.contains("Amit")));
        assert!(!out.contains("null"));

        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_pie_shares() {
        let out = plain(visualization(&json!({
            "type": "pie", "labels": ["UPI", "Cash"], "values": [3, 1]
        })));
        assert!(out.contains("UPI: 3 (75.0%)"));
        assert!(out.contains("Cash: 1 (25.0%)"));
    }

    #[test]
    fn test_unknown_shape_is_pretty_printed() {
        let out = visualization(&json!({ "type": "radar", "points": [1, 2] }));
        assert!(out.contains("\"radar\""));
    }

    #[test]
    fn test_line_series_objects() {
        let out = plain(visualization(&json!({
            "type": "line",
            "labels": ["Jan", "Feb"],
            "series": [{ "label": "Sales", "data": [10, 20] }]
        })));
        assert!(out.contains("Jan → Feb"));
        assert!(out.contains("Sales: 10, 20"));
    }

    #[test]
    fn test_dashboard_sections() {
        let data = domain::ErpDataset::bundled().unwrap();
        let out = plain(dashboard(&SalesDashboard::build(&data)));
        assert!(out.contains("Sales overview"));
        assert!(out.contains("Reorder now"));
        let alert = out.lines().find(|l| l.contains("P004")).unwrap();
        assert!(alert.contains("Mechanical Keyboard") && alert.contains(" 8 ") && alert.contains("15"));
        assert!(out.contains("Recent sales"));
        let sale = out.lines().find(|l| l.contains("S1012")).unwrap();
        assert!(sale.contains("2024-03-28") && sale.contains("Pending"));
    }

    #[test]
    fn test_finance_view() {
        let data = domain::ErpDataset::bundled().unwrap();
        let out = plain(finance(&FinanceDashboard::build(&data)));

        assert!(out.contains("Net profit:    -₹2,92,600"));
        let march = out.lines().find(|l| l.contains("2024-03")).unwrap();
        assert!(march.contains("₹1,23,200") && march.contains("₹27,400"));
        let rent = out.lines().find(|l| l.contains("T3003")).unwrap();
        assert!(rent.contains("-₹85,000"));

        let first_tx = out.lines().position(|l| l.contains("T3007")).unwrap();
        let last_tx = out.lines().position(|l| l.contains("T3003")).unwrap();
        assert!(first_tx < last_tx);
    }
}
