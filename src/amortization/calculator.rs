use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{calendar, AmortizationResult, LoanTerms, PeriodEntry};
use crate::decimal::{Money, Rate};
use crate::types::InterestMethod;

/// compute the schedule for the method carried by the terms
pub fn compute_schedule(terms: &LoanTerms) -> AmortizationResult {
    AmortizationCalculator::new(terms.method()).calculate(terms)
}

/// amortization calculator
pub struct AmortizationCalculator {
    method: InterestMethod,
}

impl AmortizationCalculator {
    pub fn new(method: InterestMethod) -> Self {
        Self { method }
    }

    /// calculate schedule and totals
    ///
    /// The method given to the calculator wins over the one stored on `terms`.
    pub fn calculate(&self, terms: &LoanTerms) -> AmortizationResult {
        let (monthly_payment, schedule) = match self.method {
            InterestMethod::Fixed => {
                // one charge for the whole term
                let total_interest = terms.principal().percentage(terms.annual_rate().as_percentage());
                self.calculate_equal_split(terms, total_interest)
            }
            InterestMethod::Flat => {
                let years = Decimal::from(terms.term_months()) / dec!(12);
                let total_interest = terms.principal() * (terms.annual_rate().as_decimal() * years);
                self.calculate_equal_split(terms, total_interest)
            }
            InterestMethod::Reducing => self.calculate_reducing_balance(terms),
        };

        let principal = terms.principal();
        let total_interest: Money = schedule.iter().map(|p| p.interest_portion).sum();
        let total_repayment = principal + total_interest;

        let months = Decimal::from(terms.term_months());
        let effective_percent = (total_interest.as_decimal() / principal.as_decimal())
            * (dec!(12) / months)
            * Decimal::ONE_HUNDRED;

        debug!(
            "computed {} schedule: principal={} months={} monthly_payment={} total_interest={}",
            self.method,
            principal,
            terms.term_months(),
            monthly_payment,
            total_interest
        );

        AmortizationResult {
            total_interest,
            total_repayment,
            monthly_payment,
            effective_rate: Rate::from_percent(effective_percent),
            maturity_date: terms.maturity_date(),
            schedule,
        }
    }

    /// equal principal and equal interest each month (fixed and flat)
    fn calculate_equal_split(
        &self,
        terms: &LoanTerms,
        total_interest: Money,
    ) -> (Money, Vec<PeriodEntry>) {
        let principal = terms.principal();
        let months = terms.term_months();
        let n = Decimal::from(months);

        let monthly_payment = (principal + total_interest) / n;
        let monthly_principal = principal / n;
        let monthly_interest = total_interest / n;

        let mut schedule = Vec::with_capacity(months as usize);
        let mut balance = principal;
        let mut interest_so_far = Money::ZERO;

        for month in 1..=months {
            // the last month takes whatever rounding left behind
            let (principal_portion, interest_portion, payment) = if month == months {
                let interest = total_interest - interest_so_far;
                (balance, interest, balance + interest)
            } else {
                (monthly_principal, monthly_interest, monthly_payment)
            };

            interest_so_far += interest_portion;
            let balance_after = (balance - principal_portion).max(Money::ZERO);

            schedule.push(PeriodEntry {
                month,
                due_date: due_date(terms, month),
                payment,
                principal_portion,
                interest_portion,
                balance_after,
            });

            balance = balance_after;
        }

        (monthly_payment, schedule)
    }

    /// equal installments, interest charged on the running balance
    fn calculate_reducing_balance(&self, terms: &LoanTerms) -> (Money, Vec<PeriodEntry>) {
        let principal = terms.principal();
        let months = terms.term_months();
        let monthly_rate = terms.annual_rate().monthly_rate().as_decimal();
        let emi = annuity_payment(principal, terms.annual_rate(), months);

        let mut schedule = Vec::with_capacity(months as usize);
        let mut balance = principal;

        for month in 1..=months {
            let interest_portion = Money::from_decimal(balance.as_decimal() * monthly_rate);

            let (principal_portion, payment) = if month == months {
                (balance, balance + interest_portion)
            } else {
                (emi - interest_portion, emi)
            };

            let balance_after = (balance - principal_portion).max(Money::ZERO);

            schedule.push(PeriodEntry {
                month,
                due_date: due_date(terms, month),
                payment,
                principal_portion,
                interest_portion,
                balance_after,
            });

            balance = balance_after;
        }

        (emi, schedule)
    }
}

/// standard annuity payment
///
/// EMI = P * r * (1 + r)^n / ((1 + r)^n - 1), with r the monthly rate.
/// Falls back to straight-line repayment for a zero rate, and to P * r when
/// the compound factor no longer fits a `Decimal` (the limit as n grows).
/// A rate below `Decimal` resolution repays straight-line.
pub fn annuity_payment(principal: Money, annual_rate: Rate, months: u32) -> Money {
    if months == 0 {
        return principal;
    }

    let r = annual_rate.monthly_rate().as_decimal();
    if r.is_zero() {
        return principal / Decimal::from(months);
    }

    let base = Decimal::ONE + r;
    let mut compound = Decimal::ONE;
    for _ in 0..months {
        match compound.checked_mul(base) {
            Some(next) => compound = next,
            None => return principal * r,
        }
    }

    let growth = compound - Decimal::ONE;
    if growth <= Decimal::ZERO {
        return principal / Decimal::from(months);
    }

    match r.checked_mul(compound).and_then(|x| x.checked_div(growth)) {
        Some(factor) => principal * factor,
        None => principal * r,
    }
}

fn due_date(terms: &LoanTerms, month: u32) -> chrono::NaiveDate {
    calendar::add_months(terms.start_date(), month).unwrap_or_else(|| terms.maturity_date())
}
