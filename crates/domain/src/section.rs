//! Data sections of the fixture and the scope a query is restricted to

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One top-level block of the fixture dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Company,
    Sales,
    Purchase,
    Finance,
    Hr,
}

impl Section {
    /// Evaluation order used by the context selector
    pub const ALL: [Section; 5] = [
        Section::Company,
        Section::Sales,
        Section::Purchase,
        Section::Finance,
        Section::Hr,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Company => "company",
            Section::Sales => "sales",
            Section::Purchase => "purchase",
            Section::Finance => "finance",
            Section::Hr => "hr",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Company => "Company Info",
            Section::Sales => "Sales & Inventory",
            Section::Purchase => "Purchase Orders",
            Section::Finance => "Finance",
            Section::Hr => "HR & Payroll",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which sections a query may draw context from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SectionScope {
    #[default]
    All,
    Only(Section),
}

impl SectionScope {
    pub fn candidates(&self) -> Vec<Section> {
        match self {
            SectionScope::All => Section::ALL.to_vec(),
            SectionScope::Only(section) => vec![*section],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SectionScope::All => "All Data",
            SectionScope::Only(section) => section.label(),
        }
    }
}

impl fmt::Display for SectionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionScope::All => f.write_str("all"),
            SectionScope::Only(section) => section.fmt(f),
        }
    }
}

impl FromStr for SectionScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(SectionScope::All),
            "company" => Ok(SectionScope::Only(Section::Company)),
            "sales" => Ok(SectionScope::Only(Section::Sales)),
            "purchase" => Ok(SectionScope::Only(Section::Purchase)),
            "finance" => Ok(SectionScope::Only(Section::Finance)),
            "hr" => Ok(SectionScope::Only(Section::Hr)),
            other => Err(format!(
                "unknown section '{other}' (expected one of: all, company, sales, purchase, finance, hr)"
            )),
        }
    }
}
