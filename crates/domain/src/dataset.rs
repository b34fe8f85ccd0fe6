//! Fixture dataset - the application's only data store
//!
//! The dataset is loaded once at startup and handed out as `&ErpDataset`.
//! Field names keep the fixture's JSON keys on (de)serialisation so that
//! subsets embedded into prompts look exactly like the bundled file.

use crate::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placeholder rendered when a record references a product id that is not in the catalog
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

const BUNDLED_DATASET: &str = include_str!("../data/erp_data.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErpDataset {
    #[serde(rename = "Company_Name")]
    pub company_name: String,
    #[serde(rename = "Company_Details")]
    pub company_details: CompanyDetails,
    #[serde(rename = "Sales_Inventory")]
    pub sales_inventory: SalesInventory,
    #[serde(rename = "Purchase_Orders")]
    pub purchase_orders: PurchaseOrders,
    #[serde(rename = "Finance_Accounting")]
    pub finance_accounting: FinanceAccounting,
    #[serde(rename = "HR_Payroll")]
    pub hr_payroll: HrPayroll,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompanyDetails {
    #[serde(rename = "Registration_Number")]
    pub registration_number: String,
    #[serde(rename = "GSTIN")]
    pub gstin: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesInventory {
    #[serde(rename = "Products")]
    pub products: Vec<Product>,
    #[serde(rename = "Sales_Transactions")]
    pub sales_transactions: Vec<SalesTransaction>,
    #[serde(rename = "Customers", default)]
    pub customers: Vec<Customer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "Product_ID")]
    pub product_id: String,
    #[serde(rename = "Product_Name")]
    pub product_name: String,
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(rename = "Unit_Price")]
    pub unit_price: f64,
    #[serde(rename = "Stock_Available")]
    pub stock_available: u32,
    #[serde(rename = "Reorder_Level")]
    pub reorder_level: u32,
    #[serde(rename = "GST")]
    pub gst: GstRates,
}

/// Tax rates in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct GstRates {
    pub cgst: f64,
    pub sgst: f64,
}

impl GstRates {
    /// Combined rate as a fraction (18% -> 0.18)
    pub fn combined_fraction(&self) -> f64 {
        (self.cgst + self.sgst) / 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesTransaction {
    #[serde(rename = "Sale_ID")]
    pub sale_id: String,
    #[serde(rename = "Product_ID")]
    pub product_id: String,
    #[serde(rename = "Customer_Name")]
    pub customer_name: String,
    #[serde(rename = "Customer_Type")]
    pub customer_type: String,
    #[serde(rename = "Quantity_Sold")]
    pub quantity_sold: u32,
    #[serde(rename = "Net_Amount")]
    pub net_amount: f64,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Payment_Mode")]
    pub payment_mode: String,
}

impl SalesTransaction {
    /// Card and bank payments count as settled, everything else is pending
    pub fn is_paid(&self) -> bool {
        matches!(self.payment_mode.as_str(), "Credit Card" | "Bank Transfer")
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_paid() {
            "Paid"
        } else {
            "Pending"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Customer {
    #[serde(rename = "Customer_ID")]
    pub customer_id: String,
    pub name: String,
    #[serde(rename = "Type")]
    pub customer_type: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrders {
    #[serde(rename = "Suppliers")]
    pub suppliers: Vec<Supplier>,
    #[serde(rename = "Purchase_Transactions")]
    pub purchase_transactions: Vec<PurchaseTransaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    #[serde(rename = "Supplier_ID")]
    pub supplier_id: String,
    #[serde(rename = "Supplier_Name")]
    pub supplier_name: String,
    #[serde(rename = "Contact_Person", default)]
    pub contact_person: String,
    #[serde(rename = "Phone", default)]
    pub phone: String,
    #[serde(rename = "Products_Supplied", default)]
    pub products_supplied: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseTransaction {
    #[serde(rename = "Purchase_ID")]
    pub purchase_id: String,
    #[serde(rename = "Supplier_ID")]
    pub supplier_id: String,
    #[serde(rename = "Product_ID")]
    pub product_id: String,
    #[serde(rename = "Quantity")]
    pub quantity: u32,
    #[serde(rename = "Total_Cost")]
    pub total_cost: f64,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Status")]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceAccounting {
    #[serde(rename = "Transactions")]
    pub transactions: Vec<FinanceTransaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FinanceTransaction {
    #[serde(rename = "Transaction_ID")]
    pub transaction_id: String,
    #[serde(rename = "Type")]
    pub kind: String,
    pub amount: f64,
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub mode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HrPayroll {
    #[serde(rename = "Employees")]
    pub employees: Vec<Employee>,
    #[serde(rename = "Payroll_Transactions")]
    pub payroll_transactions: Vec<PayrollTransaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "Employee_ID")]
    pub employee_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Designation")]
    pub designation: String,
    #[serde(rename = "Join_Date")]
    pub join_date: String,
    #[serde(rename = "Net_Salary")]
    pub net_salary: f64,
    #[serde(rename = "Email", default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollTransaction {
    #[serde(rename = "Payroll_ID")]
    pub payroll_id: String,
    #[serde(rename = "Employee_ID")]
    pub employee_id: String,
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Gross_Salary")]
    pub gross_salary: f64,
    #[serde(rename = "Deductions")]
    pub deductions: f64,
    #[serde(rename = "Net_Paid")]
    pub net_paid: f64,
    #[serde(rename = "Payment_Date")]
    pub payment_date: String,
}

impl ErpDataset {
    /// Parse the fixture shipped inside the binary
    pub fn bundled() -> DomainResult<Self> {
        Self::from_json_str(BUNDLED_DATASET)
    }

    pub fn from_json_str(json: &str) -> DomainResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a fixture with the same layout from disk
    pub fn from_path(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| DomainError::DatasetIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.sales_inventory
            .products
            .iter()
            .find(|p| p.product_id == product_id)
    }

    /// Product name, or the "Unknown Product" placeholder on a lookup miss
    pub fn product_name(&self, product_id: &str) -> &str {
        self.product(product_id)
            .map(|p| p.product_name.as_str())
            .unwrap_or(UNKNOWN_PRODUCT)
    }

    pub fn employee(&self, employee_id: &str) -> Option<&Employee> {
        self.hr_payroll
            .employees
            .iter()
            .find(|e| e.employee_id == employee_id)
    }

    pub fn supplier(&self, supplier_id: &str) -> Option<&Supplier> {
        self.purchase_orders
            .suppliers
            .iter()
            .find(|s| s.supplier_id == supplier_id)
    }
}
