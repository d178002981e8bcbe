use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};

/// longest accepted term, a thousand years of monthly payments
pub const MAX_TERM_MONTHS: u32 = 12_000;

/// validated loan parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoanTerms {
    principal: Money,
    annual_rate: Rate,
    term_months: u32,
}

impl LoanTerms {
    /// Validate and build loan terms.
    ///
    /// Principal must be positive, the rate non-negative and the term
    /// between one and [`MAX_TERM_MONTHS`] months.
    pub fn new(principal: Money, annual_rate: Rate, term_months: u32) -> Result<Self> {
        if !principal.is_positive() {
            return Err(ScheduleError::invalid(
                "principal",
                format!("must be greater than zero, got {}", principal),
            ));
        }

        if annual_rate.is_negative() {
            return Err(ScheduleError::invalid(
                "annual rate",
                format!("must not be negative, got {}", annual_rate),
            ));
        }

        if term_months == 0 {
            return Err(ScheduleError::invalid("term", "must be at least 1 month"));
        }

        if term_months > MAX_TERM_MONTHS {
            return Err(ScheduleError::invalid(
                "term",
                format!("must be at most {} months, got {}", MAX_TERM_MONTHS, term_months),
            ));
        }

        Ok(Self {
            principal,
            annual_rate,
            term_months,
        })
    }

    /// parse raw text input, as typed into a form or passed on a command line
    pub fn parse(principal: &str, annual_rate: &str, term_months: &str) -> Result<Self> {
        let principal = Money::from_str_exact(principal).map_err(|e| {
            ScheduleError::invalid("principal", format!("'{}' is not a number: {}", principal.trim(), e))
        })?;

        let annual_rate = Rate::from_str_exact(annual_rate).map_err(|e| {
            ScheduleError::invalid("annual rate", format!("'{}' is not a number: {}", annual_rate.trim(), e))
        })?;

        let term_text = term_months.trim();
        let term_months = term_text.parse::<i64>().map_err(|_| {
            ScheduleError::invalid("term", format!("'{}' is not a whole number of months", term_text))
        })?;
        let term_months = u32::try_from(term_months).map_err(|_| {
            ScheduleError::invalid("term", format!("{} is out of range", term_months))
        })?;

        Self::new(principal, annual_rate, term_months)
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
}

/// one month of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub month: u32,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub total_payment: Money,
    pub remaining_balance: Money,
}
