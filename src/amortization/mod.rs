pub mod calculator;
pub mod calendar;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::types::InterestMethod;

pub use calculator::{annuity_payment, compute_schedule, AmortizationCalculator};

/// longest term the calculator accepts (50 years)
pub const MAX_TERM_MONTHS: u32 = 600;

/// multiple of the largest schedule amount that must still fit a `Decimal`;
/// covers the percent scaling and annualization done by the calculator
const ARITHMETIC_HEADROOM: Decimal = dec!(10000);

/// inputs to one amortization run
///
/// Construction is the precondition gate: a `LoanTerms` value always has a
/// positive principal, a positive rate, a term of 1..=600 months, totals
/// that fit a `Decimal`, and a maturity date that chrono can represent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    principal: Money,
    annual_rate: Rate,
    term_months: u32,
    start_date: NaiveDate,
    method: InterestMethod,
}

impl LoanTerms {
    pub fn new(
        principal: Money,
        annual_rate: Rate,
        term_months: u32,
        start_date: NaiveDate,
        method: InterestMethod,
    ) -> Result<Self> {
        if !principal.is_positive() {
            return Err(LoanError::InvalidPrincipal { amount: principal });
        }
        if !annual_rate.is_positive() {
            return Err(LoanError::InvalidInterestRate { rate: annual_rate });
        }
        if term_months == 0 || term_months > MAX_TERM_MONTHS {
            return Err(LoanError::InvalidTerm { months: term_months });
        }
        check_magnitude(principal, annual_rate, term_months)?;
        if calendar::add_months(start_date, term_months).is_none() {
            return Err(LoanError::InvalidDate {
                message: format!("{start_date} plus {term_months} months is out of range"),
            });
        }

        Ok(Self {
            principal,
            annual_rate,
            term_months,
            start_date,
            method,
        })
    }

    /// same terms under a different interest method
    pub fn with_method(mut self, method: InterestMethod) -> Self {
        self.method = method;
        self
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn annual_rate(&self) -> Rate {
        self.annual_rate
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn method(&self) -> InterestMethod {
        self.method
    }

    /// start date advanced by the term
    pub fn maturity_date(&self) -> NaiveDate {
        // representable, checked in new()
        calendar::add_months(self.start_date, self.term_months).unwrap_or(self.start_date)
    }
}

/// principal * (1 + rate * max(1, years) * headroom) must be representable
fn check_magnitude(principal: Money, annual_rate: Rate, term_months: u32) -> Result<()> {
    let years = (Decimal::from(term_months) / dec!(12)).max(Decimal::ONE);

    let charge = annual_rate
        .as_decimal()
        .checked_mul(years)
        .and_then(|c| c.checked_mul(ARITHMETIC_HEADROOM))
        .and_then(|c| c.checked_add(Decimal::ONE))
        .ok_or_else(|| LoanError::OutOfRange {
            field: "annual_rate".to_string(),
            message: "interest rate is too high to schedule".to_string(),
        })?;

    principal
        .checked_mul(charge)
        .map(|_| ())
        .ok_or_else(|| LoanError::OutOfRange {
            field: "principal".to_string(),
            message: format!("{principal} is too large to schedule at this rate"),
        })
}

/// one month of the repayment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodEntry {
    pub month: u32,
    pub due_date: NaiveDate,
    pub payment: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub balance_after: Money,
}

/// schedule and totals derived from a set of loan terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationResult {
    pub total_interest: Money,
    pub total_repayment: Money,
    pub monthly_payment: Money,
    /// annualized (total_interest / principal) over the term
    pub effective_rate: Rate,
    pub maturity_date: NaiveDate,
    pub schedule: Vec<PeriodEntry>,
}

impl AmortizationResult {
    /// get entry for a 1-based month
    pub fn period(&self, month: u32) -> Option<&PeriodEntry> {
        month
            .checked_sub(1)
            .and_then(|idx| self.schedule.get(idx as usize))
    }

    /// outstanding balance once `month` has been paid
    pub fn balance_after(&self, month: u32) -> Option<Money> {
        self.period(month).map(|p| p.balance_after)
    }

    pub fn total_principal(&self) -> Money {
        self.schedule.iter().map(|p| p.principal_portion).sum()
    }

    pub fn term_months(&self) -> u32 {
        self.schedule.len() as u32
    }
}
