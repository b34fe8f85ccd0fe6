//! Income and expense aggregates over `Finance_Accounting.Transactions`

use crate::dataset::{ErpDataset, FinanceTransaction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    /// `Type` is matched case-insensitively; anything else is not a cash movement
    pub fn classify(tx: &FinanceTransaction) -> Option<Self> {
        let kind = tx.kind.trim();
        if kind.eq_ignore_ascii_case("income") {
            Some(EntryKind::Income)
        } else if kind.eq_ignore_ascii_case("expense") {
            Some(EntryKind::Expense)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinanceOverview {
    pub income: f64,
    pub expenses: f64,
    pub net_profit: f64,
    /// Net profit as a share of income, 0 when there is no income
    pub profit_margin: f64,
    /// Expenses as a share of income, 0 when there is no income
    pub expense_ratio: f64,
    pub transaction_count: usize,
}

/// A transaction with its amount signed: income positive, expenses negative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub transaction_id: String,
    pub date: String,
    pub description: String,
    pub mode: String,
    pub kind: EntryKind,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCashFlow {
    /// `YYYY-MM`
    pub month: String,
    pub income: f64,
    pub expenses: f64,
}

impl MonthlyCashFlow {
    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }
}

pub fn finance_overview(data: &ErpDataset) -> FinanceOverview {
    let mut overview = FinanceOverview::default();
    for tx in &data.finance_accounting.transactions {
        match EntryKind::classify(tx) {
            Some(EntryKind::Income) => overview.income += tx.amount,
            Some(EntryKind::Expense) => overview.expenses += tx.amount,
            None => continue,
        }
        overview.transaction_count += 1;
    }

    overview.net_profit = overview.income - overview.expenses;
    if overview.income > 0.0 {
        overview.profit_margin = overview.net_profit / overview.income * 100.0;
        overview.expense_ratio = overview.expenses / overview.income * 100.0;
    }
    overview
}

/// Income and expenses in one list, newest first
pub fn ledger(data: &ErpDataset) -> Vec<LedgerEntry> {
    let mut entries: Vec<LedgerEntry> = data
        .finance_accounting
        .transactions
        .iter()
        .filter_map(|tx| {
            let kind = EntryKind::classify(tx)?;
            let amount = match kind {
                EntryKind::Income => tx.amount,
                EntryKind::Expense => -tx.amount,
            };
            Some(LedgerEntry {
                transaction_id: tx.transaction_id.clone(),
                date: tx.date.clone(),
                description: tx.description.clone(),
                mode: tx.mode.clone(),
                kind,
                amount,
            })
        })
        .collect();

    // ISO dates sort lexically; ties keep the fixture order
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}

pub fn monthly_cash_flow(data: &ErpDataset) -> Vec<MonthlyCashFlow> {
    let mut months: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for tx in &data.finance_accounting.transactions {
        let (Some(kind), Some(month)) = (EntryKind::classify(tx), tx.date.get(..7)) else {
            continue;
        };
        let entry = months.entry(month.to_string()).or_default();
        match kind {
            EntryKind::Income => entry.0 += tx.amount,
            EntryKind::Expense => entry.1 += tx.amount,
        }
    }

    months
        .into_iter()
        .map(|(month, (income, expenses))| MonthlyCashFlow {
            month,
            income,
            expenses,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> ErpDataset {
        ErpDataset::bundled().unwrap()
    }

    #[test]
    fn test_overview_from_fixture() {
        let overview = finance_overview(&dataset());

        assert_eq!(overview.income, 660_300.0);
        assert_eq!(overview.expenses, 952_900.0);
        assert_eq!(overview.net_profit, -292_600.0);
        assert_eq!(overview.transaction_count, 8);
        assert!(overview.profit_margin < 0.0);
        assert!((overview.expense_ratio - 952_900.0 / 660_300.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_overview_without_income() {
        let mut data = dataset();
        data.finance_accounting
            .transactions
            .retain(|tx| EntryKind::classify(tx) == Some(EntryKind::Expense));

        let overview = finance_overview(&data);
        assert_eq!(overview.income, 0.0);
        assert_eq!(overview.profit_margin, 0.0);
        assert_eq!(overview.expense_ratio, 0.0);
    }

    #[test]
    fn test_ledger_signs_and_order() {
        let entries = ledger(&dataset());

        assert_eq!(entries.len(), 8);
        assert_eq!(entries[0].transaction_id, "T3007");
        assert!(entries.windows(2).all(|w| w[0].date >= w[1].date));
        for entry in &entries {
            match entry.kind {
                EntryKind::Income => assert!(entry.amount > 0.0),
                EntryKind::Expense => assert!(entry.amount < 0.0),
            }
        }
        let net: f64 = entries.iter().map(|e| e.amount).sum();
        assert_eq!(net, -292_600.0);
    }

    #[test]
    fn test_unknown_type_is_skipped() {
        let mut data = dataset();
        let mut transfer = data.finance_accounting.transactions[0].clone();
        transfer.transaction_id = "T9999".to_string();
        transfer.kind = "Transfer".to_string();
        data.finance_accounting.transactions.push(transfer);

        assert_eq!(finance_overview(&data).transaction_count, 8);
        assert!(ledger(&data).iter().all(|e| e.transaction_id != "T9999"));
    }

    #[test]
    fn test_monthly_cash_flow() {
        let months = monthly_cash_flow(&dataset());

        let labels: Vec<&str> = months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(labels, vec!["2024-01", "2024-02", "2024-03"]);
        assert_eq!(months[0].income, 293_600.0);
        assert_eq!(months[0].expenses, 585_000.0);
        assert_eq!(months[2].net(), 123_200.0 - 27_400.0);
    }
}
