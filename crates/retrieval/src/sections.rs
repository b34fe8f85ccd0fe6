//! Shared section configuration table
//!
//! One table drives every assistant: per section, the keywords that make it
//! relevant and the narrowing rules that decide which slice of the section
//! gets attached. Bump `SECTION_TABLE_VERSION` whenever a list changes, since
//! selection results (and therefore prompts) change with it.

use domain::Section;

pub const SECTION_TABLE_VERSION: u32 = 1;

/// Slot of the retrieval context a rule may fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKey {
    Company,
    Products,
    Sales,
    SalesInventory,
    Suppliers,
    Purchases,
    PurchaseOrders,
    Finance,
    Employees,
    Payroll,
    HrPayroll,
}

/// Attach `key` when the raw query contains any trigger
#[derive(Debug)]
pub struct Narrowing {
    pub triggers: &'static [&'static str],
    pub key: DataKey,
}

#[derive(Debug)]
pub struct SectionRule {
    pub section: Section,
    pub keywords: &'static [&'static str],
    pub narrowings: &'static [Narrowing],
    /// Attached when no narrowing fires (the whole block)
    pub fallback: DataKey,
}

pub static SECTION_TABLE: [SectionRule; 5] = [
    SectionRule {
        section: Section::Company,
        keywords: &[
            "company",
            "business",
            "organization",
            "address",
            "contact",
            "email",
            "gstin",
            "registration",
            "owner",
        ],
        narrowings: &[],
        fallback: DataKey::Company,
    },
    SectionRule {
        section: Section::Sales,
        keywords: &[
            "sales",
            "revenue",
            "product",
            "inventory",
            "stock",
            "customer",
            "invoice",
            "transactions",
            "sold",
            "selling",
            "sell",
            "purchase",
            "buy",
        ],
        narrowings: &[
            Narrowing {
                triggers: &["product", "inventory", "stock"],
                key: DataKey::Products,
            },
            Narrowing {
                triggers: &["sales", "transaction", "customer", "revenue"],
                key: DataKey::Sales,
            },
        ],
        fallback: DataKey::SalesInventory,
    },
    SectionRule {
        section: Section::Purchase,
        // "procurement" is listed twice and counts twice
        keywords: &[
            "purchase",
            "order",
            "supplier",
            "vendor",
            "buy",
            "procurement",
            "po",
            "buying",
            "purchased",
            "procurement",
        ],
        narrowings: &[
            Narrowing {
                triggers: &["supplier", "vendor"],
                key: DataKey::Suppliers,
            },
            Narrowing {
                triggers: &["purchase", "order", "po"],
                key: DataKey::Purchases,
            },
        ],
        fallback: DataKey::PurchaseOrders,
    },
    SectionRule {
        section: Section::Finance,
        keywords: &[
            "finance",
            "accounting",
            "transaction",
            "payment",
            "receipt",
            "money",
            "cash",
            "bank",
            "expense",
            "income",
            "profit",
            "loss",
            "financial",
        ],
        narrowings: &[],
        fallback: DataKey::Finance,
    },
    SectionRule {
        section: Section::Hr,
        keywords: &[
            "hr",
            "employee",
            "staff",
            "salary",
            "payroll",
            "department",
            "designation",
            "join date",
            "team",
            "human resource",
            "personnel",
        ],
        narrowings: &[
            Narrowing {
                triggers: &["employee", "staff", "department"],
                key: DataKey::Employees,
            },
            Narrowing {
                triggers: &["payroll", "salary", "payment"],
                key: DataKey::Payroll,
            },
        ],
        fallback: DataKey::HrPayroll,
    },
];

/// Analysis verbs that widen the context to full blocks
pub const ANALYSIS_TRIGGERS: [&str; 4] = ["compare", "calculate", "analyze", "report"];

/// Pairs of section names that, together with an analysis verb, force full blocks
pub static AUGMENTATION_RULES: [(&str, &str, &[DataKey]); 2] = [
    (
        "sales",
        "purchase",
        &[DataKey::SalesInventory, DataKey::PurchaseOrders],
    ),
    (
        "finance",
        "sales",
        &[DataKey::Finance, DataKey::SalesInventory],
    ),
];

impl SectionRule {
    pub fn for_section(section: Section) -> &'static SectionRule {
        match section {
            Section::Company => &SECTION_TABLE[0],
            Section::Sales => &SECTION_TABLE[1],
            Section::Purchase => &SECTION_TABLE[2],
            Section::Finance => &SECTION_TABLE[3],
            Section::Hr => &SECTION_TABLE[4],
        }
    }

    /// Number of configured keywords occurring as substrings of `text`
    pub fn hit_count(&self, text: &str) -> u32 {
        self.keywords.iter().filter(|kw| text.contains(*kw)).count() as u32
    }

    /// A section is picked on any keyword hit or when the query names it
    pub fn is_match(&self, hits: u32, query_lower: &str) -> bool {
        hits > 0 || query_lower.contains(self.section.name())
    }

    /// Slots to fill for this section given the lower-cased query
    pub fn data_keys(&self, query_lower: &str) -> Vec<DataKey> {
        let narrowed: Vec<DataKey> = self
            .narrowings
            .iter()
            .filter(|n| n.triggers.iter().any(|t| query_lower.contains(t)))
            .map(|n| n.key)
            .collect();

        if narrowed.is_empty() {
            vec![self.fallback]
        } else {
            narrowed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_evaluation_order() {
        let order: Vec<Section> = SECTION_TABLE.iter().map(|r| r.section).collect();
        assert_eq!(order, Section::ALL.to_vec());
        for section in Section::ALL {
            assert_eq!(SectionRule::for_section(section).section, section);
        }
    }

    #[test]
    fn test_duplicate_keyword_counts_twice() {
        let rule = SectionRule::for_section(Section::Purchase);
        assert_eq!(rule.hit_count("procurement plan"), 2);
    }

    #[test]
    fn test_multi_word_keywords_are_substrings() {
        let rule = SectionRule::for_section(Section::Hr);
        assert_eq!(rule.hit_count("what is the join date of arjun"), 1);
        assert_eq!(rule.hit_count("nothing here"), 0);
    }

    #[test]
    fn test_sales_narrowing() {
        let rule = SectionRule::for_section(Section::Sales);
        assert_eq!(rule.data_keys("stock levels"), vec![DataKey::Products]);
        assert_eq!(rule.data_keys("top customer"), vec![DataKey::Sales]);
        assert_eq!(
            rule.data_keys("product revenue"),
            vec![DataKey::Products, DataKey::Sales]
        );
        assert_eq!(rule.data_keys("what did we sell"), vec![DataKey::SalesInventory]);
    }

    #[test]
    fn test_whole_block_sections() {
        assert_eq!(
            SectionRule::for_section(Section::Finance).data_keys("payment"),
            vec![DataKey::Finance]
        );
        assert_eq!(
            SectionRule::for_section(Section::Company).data_keys("owner"),
            vec![DataKey::Company]
        );
    }

    #[test]
    fn test_section_name_match_without_keywords() {
        let rule = SectionRule::for_section(Section::Company);
        assert!(rule.is_match(0, "tell me about the company"));
        assert!(!rule.is_match(0, "tell me something"));
    }
}
