//! Sales and inventory aggregates for the dashboard views

use crate::dataset::{ErpDataset, Product};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Number of products shown in the "top products" ranking
pub const TOP_PRODUCTS_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesMetrics {
    pub total_sales: f64,
    pub total_orders: usize,
    pub average_order: f64,
    pub inventory_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPerformance {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySales {
    /// `YYYY-MM`
    pub month: String,
    /// Short month name, e.g. `Jan`
    pub label: String,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockLevel {
    InStock,
    Low,
    Critical,
}

impl StockLevel {
    /// above 1.5x reorder level is healthy, at or below reorder level is critical
    pub fn classify(product: &Product) -> Self {
        let stock = f64::from(product.stock_available);
        let reorder = f64::from(product.reorder_level);
        if stock > reorder * 1.5 {
            StockLevel::InStock
        } else if stock > reorder {
            StockLevel::Low
        } else {
            StockLevel::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockLevel::InStock => "In Stock",
            StockLevel::Low => "Low Stock",
            StockLevel::Critical => "Critical Stock",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryStatus {
    pub in_stock: usize,
    pub low: usize,
    pub critical: usize,
}

pub fn sales_metrics(data: &ErpDataset) -> SalesMetrics {
    let sales = &data.sales_inventory.sales_transactions;
    let total_sales: f64 = sales.iter().map(|s| s.net_amount).sum();
    let total_orders = sales.len();
    let average_order = total_sales / total_orders.max(1) as f64;
    let inventory_value = data
        .sales_inventory
        .products
        .iter()
        .map(|p| p.unit_price * f64::from(p.stock_available))
        .sum();

    SalesMetrics {
        total_sales,
        total_orders,
        average_order,
        inventory_value,
    }
}

/// Revenue ranking; sales that reference an unknown product are left out
pub fn top_products(data: &ErpDataset, limit: usize) -> Vec<ProductPerformance> {
    let mut per_product: HashMap<&str, (u32, f64)> = HashMap::new();
    for sale in &data.sales_inventory.sales_transactions {
        let entry = per_product.entry(sale.product_id.as_str()).or_default();
        entry.0 += sale.quantity_sold;
        entry.1 += sale.net_amount;
    }

    let mut ranked: Vec<ProductPerformance> = per_product
        .into_iter()
        .filter_map(|(id, (quantity, revenue))| {
            data.product(id).map(|product| ProductPerformance {
                id: id.to_string(),
                name: product.product_name.clone(),
                quantity,
                revenue,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.revenue
            .partial_cmp(&a.revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    ranked.truncate(limit);
    ranked
}

pub fn monthly_sales(data: &ErpDataset) -> Vec<MonthlySales> {
    let mut months: BTreeMap<String, f64> = BTreeMap::new();
    for sale in &data.sales_inventory.sales_transactions {
        let Some(month) = sale.date.get(..7) else {
            continue;
        };
        *months.entry(month.to_string()).or_default() += sale.net_amount;
    }

    months
        .into_iter()
        .map(|(month, total)| {
            let label = NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d")
                .map(|d| d.format("%b").to_string())
                .unwrap_or_else(|_| month.clone());
            MonthlySales { month, label, total }
        })
        .collect()
}

pub fn inventory_status(data: &ErpDataset) -> InventoryStatus {
    data.sales_inventory
        .products
        .iter()
        .fold(InventoryStatus::default(), |mut acc, product| {
            match StockLevel::classify(product) {
                StockLevel::InStock => acc.in_stock += 1,
                StockLevel::Low => acc.low += 1,
                StockLevel::Critical => acc.critical += 1,
            }
            acc
        })
}

/// Products at or below their reorder level
pub fn products_below_reorder(data: &ErpDataset) -> Vec<&Product> {
    data.sales_inventory
        .products
        .iter()
        .filter(|p| p.stock_available <= p.reorder_level)
        .collect()
}

/// Format an amount the way the assistants are asked to: `₹1,23,456`
pub fn format_inr(amount: f64) -> String {
    // sign of the rounded value, so -0.4 prints as ₹0
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = (rounded.abs() as u64).to_string();

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut parts: Vec<String> = Vec::new();
        let head_chars: Vec<char> = head.chars().collect();
        let mut end = head_chars.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            parts.push(head_chars[start..end].iter().collect());
            end = start;
        }
        parts.reverse();
        format!("{},{}", parts.join(","), tail)
    };

    if negative {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> ErpDataset {
        ErpDataset::bundled().unwrap()
    }

    #[test]
    fn test_sales_metrics_match_fixture() {
        let data = dataset();
        let metrics = sales_metrics(&data);
        let expected: f64 = data
            .sales_inventory
            .sales_transactions
            .iter()
            .map(|s| s.net_amount)
            .sum();
        assert_eq!(metrics.total_orders, 12);
        assert!((metrics.total_sales - expected).abs() < 1e-6);
        assert!((metrics.average_order - expected / 12.0).abs() < 1e-6);
        assert!(metrics.inventory_value > 0.0);
    }

    #[test]
    fn test_average_order_with_no_sales() {
        let mut data = dataset();
        data.sales_inventory.sales_transactions.clear();
        let metrics = sales_metrics(&data);
        assert_eq!(metrics.total_orders, 0);
        assert_eq!(metrics.average_order, 0.0);
    }

    #[test]
    fn test_top_products_skip_unknown_ids() {
        let data = dataset();
        let top = top_products(&data, TOP_PRODUCTS_LIMIT);
        assert_eq!(top.len(), TOP_PRODUCTS_LIMIT);
        assert!(top.iter().all(|p| p.id != "P999"));
        assert_eq!(top[0].id, "P001");
        assert_eq!(top[0].quantity, 7);
        assert!(top.windows(2).all(|w| w[0].revenue >= w[1].revenue));
    }

    #[test]
    fn test_monthly_sales_sorted() {
        let months = monthly_sales(&dataset());
        let keys: Vec<&str> = months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(keys, vec!["2024-01", "2024-02", "2024-03"]);
        assert_eq!(months[0].label, "Jan");
        assert!((months[0].total - 293_600.0).abs() < 1e-6);
    }

    #[test]
    fn test_inventory_status_buckets() {
        let data = dataset();
        let status = inventory_status(&data);
        assert_eq!(
            status.in_stock + status.low + status.critical,
            data.sales_inventory.products.len()
        );
        // P004 (8/15) and P007 (4/10) are critical, P002 (12/10) and P005 (6/5) are low
        assert_eq!(status.critical, 2);
        assert_eq!(status.low, 2);
        assert_eq!(products_below_reorder(&data).len(), 2);
    }

    #[test]
    fn test_format_inr_grouping() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(999.0), "₹999");
        assert_eq!(format_inr(1000.0), "₹1,000");
        assert_eq!(format_inr(123_456.0), "₹1,23,456");
        assert_eq!(format_inr(12_345_678.0), "₹1,23,45,678");
        assert_eq!(format_inr(-2500.4), "-₹2,500");
    }

    #[test]
    fn test_format_inr_small_negatives_round_to_zero() {
        assert_eq!(format_inr(-0.4), "₹0");
        assert_eq!(format_inr(-0.0), "₹0");
        assert_eq!(format_inr(-0.6), "-₹1");
        assert_eq!(format_inr(1_234_567.0), "₹12,34,567");
    }

    proptest::proptest! {
        #[test]
        fn test_format_inr_keeps_digits(amount in 0u64..10_000_000_000) {
            let formatted = format_inr(amount as f64);
            let digits: String = formatted.chars().filter(char::is_ascii_digit).collect();
            proptest::prop_assert_eq!(digits, amount.to_string());
            proptest::prop_assert!(formatted.starts_with('₹'));
        }
    }
}
