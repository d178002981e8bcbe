pub mod amortization;
pub mod schedule;

pub use amortization::AmortizationEngine;
pub use schedule::{Schedule, ScheduleSummary};

use crate::errors::Result;
use crate::types::LoanTerms;

/// request/response entry point: validated terms in, full schedule out
pub fn calculate(terms: &LoanTerms) -> Result<Schedule> {
    AmortizationEngine::new().calculate(terms)
}
