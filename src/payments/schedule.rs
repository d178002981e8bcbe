use rust_decimal::Decimal;
use serde::Serialize;

use crate::decimal::Money;
use crate::types::PaymentRecord;

/// Ordered, immutable amortization schedule.
///
/// Only the engine builds non-empty schedules; a new calculation always
/// produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Schedule {
    records: Vec<PaymentRecord>,
}

impl Schedule {
    pub(crate) fn from_records(records: Vec<PaymentRecord>) -> Self {
        Self { records }
    }

    /// schedule with no records
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[PaymentRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PaymentRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// get record for a 1-based month
    pub fn get_payment(&self, month: u32) -> Option<&PaymentRecord> {
        month
            .checked_sub(1)
            .and_then(|i| self.records.get(i as usize))
    }

    /// constant installment, zero for an empty schedule
    pub fn monthly_payment(&self) -> Money {
        self.records
            .first()
            .map(|r| r.total_payment)
            .unwrap_or(Money::ZERO)
    }

    pub fn total_interest(&self) -> Money {
        self.records.iter().map(|r| r.interest_portion).sum()
    }

    pub fn total_principal(&self) -> Money {
        self.records.iter().map(|r| r.principal_portion).sum()
    }

    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary::from_schedule(self)
    }

    /// get json representation
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// short alias for json output
    pub fn json(&self) -> String {
        self.to_json_pretty()
            .unwrap_or_else(|e| format!("JSON error: {}", e))
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a PaymentRecord;
    type IntoIter = std::slice::Iter<'a, PaymentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// aggregate figures shown next to a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleSummary {
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub total_principal: Money,
    /// installment times number of installments
    pub total_paid: Money,
}

impl ScheduleSummary {
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let monthly_payment = schedule.monthly_payment();
        Self {
            monthly_payment,
            total_interest: schedule.total_interest(),
            total_principal: schedule.total_principal(),
            total_paid: monthly_payment * Decimal::from(schedule.len() as u64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::payments::AmortizationEngine;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_schedule_summary() {
        let summary = Schedule::empty().summary();
        assert_eq!(summary.monthly_payment, Money::ZERO);
        assert_eq!(summary.total_interest, Money::ZERO);
        assert_eq!(summary.total_principal, Money::ZERO);
        assert_eq!(summary.total_paid, Money::ZERO);
    }

    #[test]
    fn test_summary_totals() {
        let schedule = AmortizationEngine::new()
            .generate_schedule(Money::from_major(100_000), Rate::from_percent(dec!(5.0)), 12)
            .unwrap();
        let summary = schedule.summary();

        assert_eq!(summary.monthly_payment, Money::from_decimal(dec!(8560.75)));
        assert_eq!(summary.total_interest, Money::from_decimal(dec!(2728.98)));
        assert_eq!(summary.total_principal, Money::from_major(100_000));
        assert_eq!(summary.total_paid, Money::from_decimal(dec!(102729.00)));
    }

    #[test]
    fn test_get_payment_is_one_based() {
        let schedule = AmortizationEngine::new()
            .generate_schedule(Money::from_major(1_200), Rate::ZERO, 12)
            .unwrap();

        assert!(schedule.get_payment(0).is_none());
        assert_eq!(schedule.get_payment(1).unwrap().month, 1);
        assert_eq!(schedule.get_payment(12).unwrap().month, 12);
        assert!(schedule.get_payment(13).is_none());
    }

    #[test]
    fn test_json_view() {
        let schedule = AmortizationEngine::new()
            .generate_schedule(Money::from_major(1_200), Rate::ZERO, 12)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&schedule.json()).unwrap();

        let records = value.as_array().unwrap();
        assert_eq!(records.len(), 12);
        assert_eq!(records[0]["month"], 1);
        assert_eq!(records[0]["total_payment"], "100.00");
    }
}
