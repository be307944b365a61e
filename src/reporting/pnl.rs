use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};

/// category used for expenses recorded without one
pub const UNCATEGORIZED: &str = "Other";

/// headline figures for the reporting period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OperationalMetrics {
    pub monthly_revenue: Money,
    pub monthly_expenses: Money,
}

/// commission earned by the company in the period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CommissionStats {
    pub this_month_amount: Money,
}

/// one recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    #[serde(default)]
    pub category: Option<String>,
    pub amount: Money,
}

impl ExpenseRecord {
    pub fn new(category: impl Into<String>, amount: Money) -> Self {
        Self {
            category: Some(category.into()),
            amount,
        }
    }

    pub fn uncategorized(amount: Money) -> Self {
        Self {
            category: None,
            amount,
        }
    }

    /// category name, empty or missing ones grouped as "Other"
    pub fn category_name(&self) -> &str {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED)
    }
}

/// a category's slice of total expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseShare {
    pub category: String,
    pub amount: Money,
    /// share of total expenses, 0 when there are none
    pub percentage: Decimal,
}

/// profit and loss statement for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitAndLoss {
    pub total_revenue: Money,
    pub total_commission: Money,
    pub total_income: Money,
    pub expenses_by_category: BTreeMap<String, Money>,
    pub total_expenses: Money,
    pub gross_profit: Money,
    pub net_profit_margin: Rate,
}

impl ProfitAndLoss {
    /// build the statement
    ///
    /// Total expenses come from the operational metrics; the expense
    /// records only drive the per-category breakdown.
    pub fn calculate(
        metrics: &OperationalMetrics,
        commission: Option<&CommissionStats>,
        expenses: &[ExpenseRecord],
    ) -> Self {
        let total_revenue = metrics.monthly_revenue;
        let total_commission = commission
            .map(|c| c.this_month_amount)
            .unwrap_or(Money::ZERO);
        let total_income = total_revenue + total_commission;

        let mut expenses_by_category: BTreeMap<String, Money> = BTreeMap::new();
        for expense in expenses {
            *expenses_by_category
                .entry(expense.category_name().to_string())
                .or_default() += expense.amount;
        }

        let total_expenses = metrics.monthly_expenses;
        let gross_profit = total_income - total_expenses;
        let net_profit_margin = if total_income.is_zero() {
            Rate::ZERO
        } else {
            Rate::from_decimal(gross_profit.as_decimal() / total_income.as_decimal())
        };

        Self {
            total_revenue,
            total_commission,
            total_income,
            expenses_by_category,
            total_expenses,
            gross_profit,
            net_profit_margin,
        }
    }

    pub fn is_profitable(&self) -> bool {
        !self.gross_profit.is_negative()
    }

    /// categories by amount, largest first
    pub fn expense_breakdown(&self) -> Vec<ExpenseShare> {
        let mut shares: Vec<ExpenseShare> = self
            .expenses_by_category
            .iter()
            .map(|(category, amount)| ExpenseShare {
                category: category.clone(),
                amount: *amount,
                percentage: amount
                    .ratio(self.total_expenses)
                    .map(|r| r * Decimal::ONE_HUNDRED)
                    .unwrap_or(Decimal::ZERO),
            })
            .collect();

        // stable sort keeps ties in category-name order
        shares.sort_by(|a, b| b.amount.cmp(&a.amount));
        shares
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn metrics(revenue: i64, expenses: i64) -> OperationalMetrics {
        OperationalMetrics {
            monthly_revenue: Money::from_major(revenue),
            monthly_expenses: Money::from_major(expenses),
        }
    }

    #[test]
    fn test_statement_totals() {
        let commission = CommissionStats {
            this_month_amount: Money::from_major(2_000),
        };
        let expenses = vec![
            ExpenseRecord::new("Salaries", Money::from_major(20_000)),
            ExpenseRecord::new("Rent", Money::from_major(5_000)),
            ExpenseRecord::new("Salaries", Money::from_major(3_000)),
            ExpenseRecord::uncategorized(Money::from_major(2_000)),
        ];

        let pnl = ProfitAndLoss::calculate(&metrics(48_000, 30_000), Some(&commission), &expenses);

        assert_eq!(pnl.total_income, Money::from_major(50_000));
        assert_eq!(pnl.total_expenses, Money::from_major(30_000));
        assert_eq!(pnl.gross_profit, Money::from_major(20_000));
        assert_eq!(pnl.net_profit_margin.as_percentage(), dec!(40));
        assert_eq!(pnl.expenses_by_category["Salaries"], Money::from_major(23_000));
        assert_eq!(pnl.expenses_by_category[UNCATEGORIZED], Money::from_major(2_000));
        assert!(pnl.is_profitable());
    }

    #[test]
    fn test_breakdown_sorted_with_percentages() {
        let expenses = vec![
            ExpenseRecord::new("Rent", Money::from_major(2_500)),
            ExpenseRecord::new("Salaries", Money::from_major(7_500)),
            ExpenseRecord::new("", Money::from_major(0)),
        ];
        let pnl = ProfitAndLoss::calculate(&metrics(12_000, 10_000), None, &expenses);

        let breakdown = pnl.expense_breakdown();
        let names: Vec<_> = breakdown.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(names, vec!["Salaries", "Rent", "Other"]);
        assert_eq!(breakdown[0].percentage, dec!(75));
        assert_eq!(breakdown[1].percentage, dec!(25));
        assert_eq!(breakdown[2].percentage, dec!(0));
    }

    #[test]
    fn test_only_empty_category_is_other() {
        let expenses = vec![
            ExpenseRecord::new("  ", Money::from_major(40)),
            ExpenseRecord::new("", Money::from_major(10)),
            ExpenseRecord::uncategorized(Money::from_major(5)),
        ];
        let pnl = ProfitAndLoss::calculate(&metrics(100, 55), None, &expenses);

        assert_eq!(pnl.expenses_by_category["  "], Money::from_major(40));
        assert_eq!(pnl.expenses_by_category[UNCATEGORIZED], Money::from_major(15));
        assert_eq!(pnl.expenses_by_category.len(), 2);
    }

    #[test]
    fn test_no_income_no_margin() {
        let pnl = ProfitAndLoss::calculate(&metrics(0, 1_000), None, &[]);
        assert_eq!(pnl.net_profit_margin, Rate::ZERO);
        assert_eq!(pnl.gross_profit, Money::from_major(-1_000));
        assert!(!pnl.is_profitable());
        assert!(pnl.expense_breakdown().is_empty());
    }

    #[test]
    fn test_zero_total_expenses_gives_zero_share() {
        let expenses = vec![ExpenseRecord::new("Fuel", Money::from_major(300))];
        let pnl = ProfitAndLoss::calculate(&metrics(1_000, 0), None, &expenses);
        assert_eq!(pnl.expense_breakdown()[0].percentage, Decimal::ZERO);
    }
}
