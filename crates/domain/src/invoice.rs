//! Invoice draft and locally computed totals
//!
//! Totals are always computed here; the assistant is only asked to dress
//! them up as a document.

use crate::dataset::{ErpDataset, UNKNOWN_PRODUCT};
use crate::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

pub const PAYMENT_MODES: [&str; 4] = ["Credit Card", "Bank Transfer", "UPI", "Cash"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub customer_type: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    pub customer: CustomerInfo,
    pub items: Vec<InvoiceItem>,
    pub payment_mode: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub gst_percent: f64,
    pub item_total: f64,
    /// false when the product id is not in the catalog
    pub known: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub gst_amount: f64,
    pub total: f64,
}

impl InvoiceDraft {
    /// Reject drafts the form would not have submitted
    pub fn validate(&self) -> DomainResult<()> {
        if self.customer.name.trim().is_empty() {
            return Err(DomainError::MissingField("customer name"));
        }
        if self.items.is_empty() {
            return Err(DomainError::EmptyInvoice);
        }
        if let Some(item) = self.items.iter().find(|i| i.quantity == 0) {
            return Err(DomainError::InvalidQuantity(item.product_id.clone()));
        }
        Ok(())
    }

    pub fn lines(&self, data: &ErpDataset) -> Vec<InvoiceLine> {
        self.items
            .iter()
            .map(|item| match data.product(&item.product_id) {
                Some(product) => InvoiceLine {
                    product_id: item.product_id.clone(),
                    product_name: product.product_name.clone(),
                    quantity: item.quantity,
                    unit_price: product.unit_price,
                    gst_percent: product.gst.cgst + product.gst.sgst,
                    item_total: product.unit_price * f64::from(item.quantity),
                    known: true,
                },
                None => InvoiceLine {
                    product_id: item.product_id.clone(),
                    product_name: UNKNOWN_PRODUCT.to_string(),
                    quantity: item.quantity,
                    unit_price: 0.0,
                    gst_percent: 0.0,
                    item_total: 0.0,
                    known: false,
                },
            })
            .collect()
    }

    /// Unknown products contribute nothing to the totals
    pub fn totals(&self, data: &ErpDataset) -> InvoiceTotals {
        let (subtotal, gst_amount) = self
            .items
            .iter()
            .filter_map(|item| data.product(&item.product_id).map(|p| (p, item.quantity)))
            .fold((0.0, 0.0), |(subtotal, gst), (product, qty)| {
                let item_total = product.unit_price * f64::from(qty);
                (
                    subtotal + item_total,
                    gst + item_total * product.gst.combined_fraction(),
                )
            });

        InvoiceTotals {
            subtotal,
            gst_amount,
            total: subtotal + gst_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(items: Vec<(&str, u32)>) -> InvoiceDraft {
        InvoiceDraft {
            customer: CustomerInfo {
                name: "Acme Solutions".to_string(),
                customer_type: "Business".to_string(),
                email: String::new(),
                phone: String::new(),
                address: String::new(),
            },
            items: items
                .into_iter()
                .map(|(id, quantity)| InvoiceItem {
                    product_id: id.to_string(),
                    quantity,
                })
                .collect(),
            payment_mode: "Credit Card".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_totals_include_gst() {
        let data = ErpDataset::bundled().unwrap();
        // P001: 55000 @ 18%, P003: 800 @ 12%
        let totals = draft(vec![("P001", 2), ("P003", 5)]).totals(&data);
        assert!((totals.subtotal - 114_000.0).abs() < 1e-6);
        assert!((totals.gst_amount - (19_800.0 + 480.0)).abs() < 1e-6);
        assert!((totals.total - 134_280.0).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_product_is_placeholder_line() {
        let data = ErpDataset::bundled().unwrap();
        let invoice = draft(vec![("P001", 1), ("NOPE", 3)]);
        let lines = invoice.lines(&data);
        assert_eq!(lines[1].product_name, UNKNOWN_PRODUCT);
        assert!(!lines[1].known);

        let totals = invoice.totals(&data);
        assert!((totals.subtotal - 55_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_validation() {
        assert!(draft(vec![("P001", 1)]).validate().is_ok());
        assert!(matches!(
            draft(vec![]).validate(),
            Err(DomainError::EmptyInvoice)
        ));
        assert!(matches!(
            draft(vec![("P001", 0)]).validate(),
            Err(DomainError::InvalidQuantity(_))
        ));

        let mut nameless = draft(vec![("P001", 1)]);
        nameless.customer.name = "  ".to_string();
        assert!(matches!(
            nameless.validate(),
            Err(DomainError::MissingField("customer name"))
        ));
    }
}
