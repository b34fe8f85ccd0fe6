//! Context selector - keyword-driven choice of the fixture slice for a query
//!
//! Selection is a pure function of `(dataset, query, scope, history)`. The
//! resulting [`RetrievalContext`] only borrows from the dataset, so a
//! selection can never write back into the fixture.

use crate::keywords::extract_keywords;
use crate::sections::{DataKey, SectionRule, ANALYSIS_TRIGGERS, AUGMENTATION_RULES};
use domain::{
    CompanyDetails, ContextSummary, Employee, ErpDataset, FinanceAccounting, HrPayroll,
    PayrollTransaction, Product, PurchaseOrders, PurchaseTransaction, SalesInventory,
    SalesTransaction, SectionScope, Supplier,
};
use serde::Serialize;
use tracing::debug;

/// Prior queries folded into keyword matching
pub const HISTORY_WINDOW: usize = 2;

/// Section name reported when nothing matched
pub const SUMMARY_SECTION: &str = "summary";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanySnapshot<'a> {
    pub name: &'a str,
    pub details: &'a CompanyDetails,
}

/// Dataset-level counts used when no section matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    pub company_name: String,
    pub product_count: usize,
    pub employee_count: usize,
    pub supplier_count: usize,
    pub sales_count: usize,
    pub finance_transactions_count: usize,
}

impl DatasetSummary {
    pub fn of(data: &ErpDataset) -> Self {
        Self {
            company_name: data.company_name.clone(),
            product_count: data.sales_inventory.products.len(),
            employee_count: data.hr_payroll.employees.len(),
            supplier_count: data.purchase_orders.suppliers.len(),
            sales_count: data.sales_inventory.sales_transactions.len(),
            finance_transactions_count: data.finance_accounting.transactions.len(),
        }
    }
}

/// Slice of the fixture attached to a query. Keys serialise in the fixed
/// field order below, not in the order sections were matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextData<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanySnapshot<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<&'a [Product]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales: Option<&'a [SalesTransaction]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_inventory: Option<&'a SalesInventory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppliers: Option<&'a [Supplier]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchases: Option<&'a [PurchaseTransaction]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_orders: Option<&'a PurchaseOrders>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finance: Option<&'a FinanceAccounting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employees: Option<&'a [Employee]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payroll: Option<&'a [PayrollTransaction]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hr_payroll: Option<&'a HrPayroll>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<DatasetSummary>,
}

impl<'a> ContextData<'a> {
    /// Fill `key` from the dataset; attaching an already present key is a no-op
    fn attach(&mut self, key: DataKey, data: &'a ErpDataset) {
        match key {
            DataKey::Company => {
                self.company.get_or_insert(CompanySnapshot {
                    name: &data.company_name,
                    details: &data.company_details,
                });
            }
            DataKey::Products => {
                self.products.get_or_insert(&data.sales_inventory.products);
            }
            DataKey::Sales => {
                self.sales
                    .get_or_insert(&data.sales_inventory.sales_transactions);
            }
            DataKey::SalesInventory => {
                self.sales_inventory.get_or_insert(&data.sales_inventory);
            }
            DataKey::Suppliers => {
                self.suppliers.get_or_insert(&data.purchase_orders.suppliers);
            }
            DataKey::Purchases => {
                self.purchases
                    .get_or_insert(&data.purchase_orders.purchase_transactions);
            }
            DataKey::PurchaseOrders => {
                self.purchase_orders.get_or_insert(&data.purchase_orders);
            }
            DataKey::Finance => {
                self.finance.get_or_insert(&data.finance_accounting);
            }
            DataKey::Employees => {
                self.employees.get_or_insert(&data.hr_payroll.employees);
            }
            DataKey::Payroll => {
                self.payroll
                    .get_or_insert(&data.hr_payroll.payroll_transactions);
            }
            DataKey::HrPayroll => {
                self.hr_payroll.get_or_insert(&data.hr_payroll);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ContextData::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalContext<'a> {
    pub sections: Vec<String>,
    pub relevance_score: u32,
    pub keywords: Vec<String>,
    pub data: ContextData<'a>,
}

impl RetrievalContext<'_> {
    /// Owned digest kept in the chat session after the borrow ends
    pub fn summary(&self) -> ContextSummary {
        ContextSummary {
            sections: self.sections.clone(),
            relevance_score: self.relevance_score,
            keywords: self.keywords.clone(),
        }
    }

    pub fn is_summary_fallback(&self) -> bool {
        self.sections.len() == 1 && self.sections[0] == SUMMARY_SECTION
    }
}

/// Picks the dataset slice a query is about
#[derive(Debug, Clone, Copy)]
pub struct ContextSelector<'a> {
    data: &'a ErpDataset,
}

impl<'a> ContextSelector<'a> {
    pub fn new(data: &'a ErpDataset) -> Self {
        Self { data }
    }

    pub fn dataset(&self) -> &'a ErpDataset {
        self.data
    }

    /// `history` holds prior queries, most recent first; only the first
    /// [`HISTORY_WINDOW`] entries are used.
    pub fn select(&self, query: &str, scope: SectionScope, history: &[String]) -> RetrievalContext<'a> {
        let query_lower = query.to_lowercase();
        let combined_query = std::iter::once(query)
            .chain(history.iter().take(HISTORY_WINDOW).map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        let mut sections = Vec::new();
        let mut relevance_score = 0;
        let mut data = ContextData::default();

        for section in scope.candidates() {
            let rule = SectionRule::for_section(section);
            let hits = rule.hit_count(&combined_query);
            if !rule.is_match(hits, &query_lower) {
                continue;
            }

            sections.push(section.name().to_string());
            relevance_score += hits;
            for key in rule.data_keys(&query_lower) {
                data.attach(key, self.data);
            }
        }

        if sections.is_empty() {
            sections.push(SUMMARY_SECTION.to_string());
            data.summary = Some(DatasetSummary::of(self.data));
        }

        if ANALYSIS_TRIGGERS.iter().any(|t| query_lower.contains(t)) {
            for (first, second, keys) in AUGMENTATION_RULES.iter() {
                if query_lower.contains(first) && query_lower.contains(second) {
                    for key in keys.iter() {
                        data.attach(*key, self.data);
                    }
                }
            }
        }

        let context = RetrievalContext {
            sections,
            relevance_score,
            keywords: extract_keywords(query),
            data,
        };

        debug!(
            scope = %scope,
            sections = ?context.sections,
            relevance_score = context.relevance_score,
            history_used = history.len().min(HISTORY_WINDOW),
            "Context selected"
        );

        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Section;

    fn dataset() -> ErpDataset {
        ErpDataset::bundled().expect("bundled fixture")
    }

    #[test]
    fn test_stock_query_attaches_products_only() {
        let data = dataset();
        let ctx = ContextSelector::new(&data).select(
            "List all products with stock below reorder level",
            SectionScope::All,
            &[],
        );
        // "reorder" contains "order", so purchase matches as well
        assert_eq!(ctx.sections, vec!["sales", "purchase"]);
        assert_eq!(ctx.data.products, Some(data.sales_inventory.products.as_slice()));
        assert!(ctx.data.sales.is_none());
        assert!(ctx.data.sales_inventory.is_none());
    }

    #[test]
    fn test_scope_restricts_candidates() {
        let data = dataset();
        let ctx = ContextSelector::new(&data).select(
            "total payment received from customer",
            SectionScope::Only(Section::Finance),
            &[],
        );
        assert_eq!(ctx.sections, vec!["finance"]);
        assert!(ctx.data.finance.is_some());
        assert!(ctx.data.sales.is_none());
    }

    #[test]
    fn test_history_adds_hits_but_not_narrowing() {
        let data = dataset();
        let selector = ContextSelector::new(&data);
        let history = vec!["which supplier delivers laptops".to_string()];
        let ctx = selector.select("and how much did that cost", SectionScope::All, &history);

        assert!(ctx.sections.contains(&"purchase".to_string()));
        // narrowing only looks at the current query
        assert!(ctx.data.suppliers.is_none());
        assert!(ctx.data.purchase_orders.is_some());
    }

    #[test]
    fn test_only_two_history_entries_are_used() {
        let data = dataset();
        let selector = ContextSelector::new(&data);
        let history = vec![
            "hello".to_string(),
            "there".to_string(),
            "employee list".to_string(),
        ];
        let ctx = selector.select("xyz123", SectionScope::All, &history);
        assert!(ctx.is_summary_fallback());
    }

    #[test]
    fn test_section_name_alone_selects_section() {
        let data = dataset();
        let ctx = ContextSelector::new(&data).select("hr", SectionScope::All, &[]);
        assert_eq!(ctx.sections, vec!["hr"]);
        assert_eq!(ctx.relevance_score, 1);
        assert!(ctx.data.hr_payroll.is_some());
    }

    #[test]
    fn test_summary_digest_matches_context() {
        let data = dataset();
        let ctx = ContextSelector::new(&data).select("company owner", SectionScope::All, &[]);
        let summary = ctx.summary();
        assert_eq!(summary.sections, ctx.sections);
        assert_eq!(summary.relevance_score, ctx.relevance_score);
        assert_eq!(summary.keywords, vec!["company", "owner"]);
    }

    #[test]
    fn test_serialised_key_order() {
        let data = dataset();
        let ctx = ContextSelector::new(&data).select(
            "company finance and employee details",
            SectionScope::All,
            &[],
        );
        let json = serde_json::to_string(&ctx.data).expect("serialize");
        let company = json.find("\"company\"").expect("company key");
        let finance = json.find("\"finance\"").expect("finance key");
        let employees = json.find("\"employees\"").expect("employees key");
        assert!(company < finance && finance < employees);
        assert!(!json.contains("\"summary\""));
    }

    #[test]
    fn test_key_order_ignores_query_wording() {
        let data = dataset();
        let selector = ContextSelector::new(&data);
        let forward = selector.select("company finance and employee details", SectionScope::All, &[]);
        let reversed = selector.select("employee details, finance and company", SectionScope::All, &[]);

        assert_eq!(
            serde_json::to_string(&forward.data).expect("serialize"),
            serde_json::to_string(&reversed.data).expect("serialize")
        );
    }
}
