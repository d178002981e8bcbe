use rust_decimal::Decimal;

use crate::decimal::{round_half_up, Money, Rate, MONEY_DP};
use crate::errors::{Result, ScheduleError};
use crate::payments::schedule::Schedule;
use crate::types::{LoanTerms, PaymentRecord};

/// Annuity (equal installment) amortization calculator.
///
/// Stateless: every call is independent and reentrant.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmortizationEngine;

impl AmortizationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Constant monthly installment for the given raw parameters.
    ///
    /// Inputs are validated the same way as [`LoanTerms::new`].
    pub fn compute_monthly_payment(
        &self,
        principal: Money,
        annual_rate: Rate,
        term_months: u32,
    ) -> Result<Money> {
        let terms = LoanTerms::new(principal, annual_rate, term_months)?;
        monthly_payment(&terms)
    }

    /// Full month-by-month schedule for the given raw parameters.
    pub fn generate_schedule(
        &self,
        principal: Money,
        annual_rate: Rate,
        term_months: u32,
    ) -> Result<Schedule> {
        let terms = LoanTerms::new(principal, annual_rate, term_months)?;
        self.calculate(&terms)
    }

    /// Build the schedule for already validated terms.
    ///
    /// Each month's interest depends on the previous month's ending balance,
    /// so records are produced strictly in order. The final month absorbs
    /// whatever residual balance the per-month rounding left behind, which
    /// forces the schedule to end at exactly zero. The residual is not
    /// clamped: with extreme inputs the last principal portion may exceed the
    /// installment or turn negative.
    pub fn calculate(&self, terms: &LoanTerms) -> Result<Schedule> {
        let payment = monthly_payment(terms)?;
        let monthly_rate = terms.annual_rate().monthly_fraction();
        let term_months = terms.term_months();

        let mut records = Vec::with_capacity(term_months as usize);
        let mut balance = terms.principal();

        for month in 1..=term_months {
            let interest = balance
                .as_decimal()
                .checked_mul(monthly_rate)
                .ok_or_else(|| ScheduleError::degenerate("interest overflowed decimal range"))?;
            let interest_portion = Money::from_decimal(round_half_up(interest, MONEY_DP));
            let mut principal_portion = payment - interest_portion;
            balance -= principal_portion;

            // settle rounding residue
            if month == term_months {
                principal_portion += balance;
                balance = Money::ZERO;
            }

            records.push(PaymentRecord {
                month,
                principal_portion,
                interest_portion,
                total_payment: payment,
                remaining_balance: balance,
            });
        }

        Ok(Schedule::from_records(records))
    }
}

/// calculate the rounded annuity installment
fn monthly_payment(terms: &LoanTerms) -> Result<Money> {
    let principal = terms.principal().as_decimal();
    let months = terms.term_months();

    if terms.annual_rate().is_zero() {
        let payment = principal / Decimal::from(months);
        return Ok(Money::from_decimal(round_half_up(payment, MONEY_DP)));
    }

    let r = terms.annual_rate().monthly_fraction();
    let payment = match compounded_payment(principal, r, months)? {
        Some(payment) => payment,
        // (1 + r)^n or the numerator left the decimal range
        None => discounted_payment(principal, r, months)?,
    };

    Ok(Money::from_decimal(round_half_up(payment, MONEY_DP)))
}

/// P * r * (1 + r)^n / ((1 + r)^n - 1), or None when an intermediate overflows
fn compounded_payment(principal: Decimal, r: Decimal, months: u32) -> Result<Option<Decimal>> {
    let compound = match compound_factor(r, months) {
        Some(compound) => compound,
        None => return Ok(None),
    };

    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        return Err(ScheduleError::degenerate(format!(
            "(1 + {})^{} - 1 is zero",
            r, months
        )));
    }

    Ok(principal
        .checked_mul(r)
        .and_then(|n| n.checked_mul(compound))
        .and_then(|n| n.checked_div(denominator)))
}

/// P * r / (1 - (1 + r)^-n), for factors too large to compound
fn discounted_payment(principal: Decimal, r: Decimal, months: u32) -> Result<Decimal> {
    let base = Decimal::ONE + r;
    let mut discount = Decimal::ONE;
    for _ in 0..months {
        discount = discount.checked_div(base).ok_or_else(|| {
            ScheduleError::degenerate(format!("discount factor (1 + {})^-{} failed", r, months))
        })?;
    }

    let denominator = Decimal::ONE - discount;
    if denominator.is_zero() {
        return Err(ScheduleError::degenerate(format!(
            "1 - (1 + {})^-{} is zero",
            r, months
        )));
    }

    principal
        .checked_mul(r)
        .and_then(|n| n.checked_div(denominator))
        .ok_or_else(|| ScheduleError::degenerate("payment overflowed decimal range"))
}

/// (1 + r)^n by repeated multiplication
fn compound_factor(r: Decimal, months: u32) -> Option<Decimal> {
    let base = Decimal::ONE + r;
    let mut compound = Decimal::ONE;
    for _ in 0..months {
        compound = compound.checked_mul(base)?;
    }
    Some(compound)
}
