use serde::Serialize;

use crate::config::NumberFormat;
use crate::decimal::Money;
use crate::payments::{Schedule, ScheduleSummary};

/// one table row, already formatted for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub month: u32,
    pub principal: String,
    pub interest: String,
    pub total: String,
    pub balance: String,
}

/// principal versus interest over the life of the loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentSplit {
    pub principal: Money,
    pub interest: Money,
}

/// everything an interactive front end needs to show a schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayModel {
    pub rows: Vec<DisplayRow>,
    pub monthly_payment: String,
    pub total_paid: String,
    pub total_interest: String,
    pub split: PaymentSplit,
}

/// format a schedule for display with an explicit number format
pub fn render(schedule: &Schedule, format: &NumberFormat) -> DisplayModel {
    let summary: ScheduleSummary = schedule.summary();

    let rows = schedule
        .iter()
        .map(|record| DisplayRow {
            month: record.month,
            principal: format.format(record.principal_portion),
            interest: format.format(record.interest_portion),
            total: format.format(record.total_payment),
            balance: format.format(record.remaining_balance),
        })
        .collect();

    DisplayModel {
        rows,
        monthly_payment: format.format_currency(summary.monthly_payment),
        total_paid: format.format_currency(summary.total_paid),
        total_interest: format.format_currency(summary.total_interest),
        split: PaymentSplit {
            principal: summary.total_principal,
            interest: summary.total_interest,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::payments::AmortizationEngine;
    use rust_decimal_macros::dec;

    #[test]
    fn test_render_czech() {
        let schedule = AmortizationEngine::new()
            .generate_schedule(Money::from_major(100_000), Rate::from_percent(dec!(5.0)), 12)
            .unwrap();
        let model = render(&schedule, &NumberFormat::czech());

        assert_eq!(model.rows.len(), 12);
        assert_eq!(
            model.rows[0],
            DisplayRow {
                month: 1,
                principal: "8 144,08".to_string(),
                interest: "416,67".to_string(),
                total: "8 560,75".to_string(),
                balance: "91 855,92".to_string(),
            }
        );
        assert_eq!(model.rows[11].balance, "0,00");
        assert_eq!(model.monthly_payment, "8 560,75 Kč");
        assert_eq!(model.total_paid, "102 729,00 Kč");
        assert_eq!(model.total_interest, "2 728,98 Kč");
        assert_eq!(model.split.principal, Money::from_major(100_000));
        assert_eq!(model.split.interest, Money::from_decimal(dec!(2728.98)));
    }

    #[test]
    fn test_render_is_locale_independent_of_computation() {
        let schedule = AmortizationEngine::new()
            .generate_schedule(Money::from_major(1_200), Rate::ZERO, 12)
            .unwrap();

        let plain = render(&schedule, &NumberFormat::plain());
        let czech = render(&schedule, &NumberFormat::czech());

        assert_eq!(plain.rows[0].principal, "100.00");
        assert_eq!(czech.rows[0].principal, "100,00");
        assert_eq!(plain.split, czech.split);
    }

    #[test]
    fn test_render_empty_schedule() {
        let model = render(&Schedule::empty(), &NumberFormat::plain());
        assert!(model.rows.is_empty());
        assert_eq!(model.monthly_payment, "0.00");
        assert_eq!(model.split.interest, Money::ZERO);
    }
}
