use std::io::{self, Write};

use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;

use crate::config::{Delimiter, ExportLabels};
use crate::payments::Schedule;
use crate::types::{LoanTerms, PaymentRecord};

/// export timestamp layout, always rendered in UTC
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders schedules as delimited text.
///
/// Amounts always use two fractional digits and `.` as decimal point,
/// independent of any display locale.
#[derive(Debug, Clone, Default)]
pub struct ScheduleFormatter {
    labels: ExportLabels,
}

impl ScheduleFormatter {
    pub fn new(labels: ExportLabels) -> Self {
        Self { labels }
    }

    /// column header followed by one line per record
    pub fn format_schedule(&self, schedule: &Schedule, delimiter: &Delimiter) -> String {
        let sep = delimiter.as_str();
        let mut out = String::new();

        out.push_str(&self.labels.columns.as_array().join(sep));
        out.push('\n');

        for record in schedule {
            out.push_str(&record_fields(record).join(sep));
            out.push('\n');
        }

        out
    }

    /// Loan info block, blank line, then the table.
    ///
    /// An empty schedule yields zero payment and totals rather than an error.
    pub fn format_schedule_with_metadata(
        &self,
        schedule: &Schedule,
        terms: &LoanTerms,
        delimiter: &Delimiter,
        exported_at: DateTime<Utc>,
    ) -> String {
        let sep = delimiter.as_str();
        let labels = &self.labels;
        let summary = schedule.summary();
        // total paid follows the requested term, not the record count
        let total_paid = summary.monthly_payment * rust_decimal::Decimal::from(terms.term_months());

        let metadata = [
            (&labels.principal, terms.principal().to_plain_string()),
            (&labels.annual_rate, terms.annual_rate().to_plain_string()),
            (&labels.term_months, terms.term_months().to_string()),
            (&labels.monthly_payment, summary.monthly_payment.to_plain_string()),
            (&labels.total_interest, summary.total_interest.to_plain_string()),
            (&labels.total_paid, total_paid.to_plain_string()),
            (&labels.exported_at, exported_at.format(TIMESTAMP_FORMAT).to_string()),
        ];

        let mut out = String::new();
        out.push_str(&labels.loan_info_marker);
        out.push('\n');
        for (key, value) in metadata {
            out.push_str(key);
            out.push_str(sep);
            out.push_str(&value);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&labels.schedule_marker);
        out.push('\n');
        out.push_str(&self.format_schedule(schedule, delimiter));

        out
    }

    /// write the plain table in a single write
    pub fn write_schedule<W: Write>(
        &self,
        sink: &mut W,
        schedule: &Schedule,
        delimiter: &Delimiter,
    ) -> io::Result<()> {
        sink.write_all(self.format_schedule(schedule, delimiter).as_bytes())?;
        sink.flush()
    }

    /// write metadata and table in a single write, stamped from the time provider
    pub fn write_schedule_with_metadata<W: Write>(
        &self,
        sink: &mut W,
        schedule: &Schedule,
        terms: &LoanTerms,
        delimiter: &Delimiter,
        time_provider: &SafeTimeProvider,
    ) -> io::Result<()> {
        let text = self.format_schedule_with_metadata(schedule, terms, delimiter, time_provider.now());
        sink.write_all(text.as_bytes())?;
        sink.flush()
    }
}

/// table only, default labels
pub fn format_schedule(schedule: &Schedule, delimiter: &Delimiter) -> String {
    ScheduleFormatter::default().format_schedule(schedule, delimiter)
}

/// metadata and table, default labels, stamped with the provider's current time
pub fn format_schedule_with_metadata(
    schedule: &Schedule,
    terms: &LoanTerms,
    delimiter: &Delimiter,
    time_provider: &SafeTimeProvider,
) -> String {
    ScheduleFormatter::default().format_schedule_with_metadata(
        schedule,
        terms,
        delimiter,
        time_provider.now(),
    )
}

fn record_fields(record: &PaymentRecord) -> [String; 5] {
    [
        record.month.to_string(),
        record.principal_portion.to_plain_string(),
        record.interest_portion.to_plain_string(),
        record.total_payment.to_plain_string(),
        record.remaining_balance.to_plain_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::{Money, Rate};
    use crate::payments::AmortizationEngine;
    use chrono::TimeZone;
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;

    fn terms() -> LoanTerms {
        LoanTerms::new(Money::from_major(100_000), Rate::from_percent(dec!(5.0)), 12).unwrap()
    }

    fn schedule() -> Schedule {
        AmortizationEngine::new().calculate(&terms()).unwrap()
    }

    fn fixed_time() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap(),
        ))
    }

    #[test]
    fn test_table_layout() {
        let text = format_schedule(&schedule(), &Delimiter::Comma);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], "month,principal,interest,total payment,remaining balance");
        assert_eq!(lines[1], "1,8144.08,416.67,8560.75,91855.92");
        assert_eq!(lines[2], "2,8178.02,382.73,8560.75,83677.90");
        assert_eq!(lines[12], "12,8525.21,35.52,8560.75,0.00");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_table_parses_back_to_records() {
        let schedule = schedule();
        let text = format_schedule(&schedule, &Delimiter::Semicolon);

        let rows: Vec<Vec<&str>> = text
            .lines()
            .skip(1)
            .map(|line| line.split(';').collect())
            .collect();
        assert_eq!(rows.len(), schedule.len());

        for (row, record) in rows.iter().zip(schedule.records()) {
            assert_eq!(row.len(), 5);
            assert_eq!(row[0].parse::<u32>().unwrap(), record.month);
            assert_eq!(Money::from_str_exact(row[1]).unwrap(), record.principal_portion);
            assert_eq!(Money::from_str_exact(row[2]).unwrap(), record.interest_portion);
            assert_eq!(Money::from_str_exact(row[3]).unwrap(), record.total_payment);
            assert_eq!(Money::from_str_exact(row[4]).unwrap(), record.remaining_balance);
        }
    }

    #[test]
    fn test_delimiter_changes_only_separator() {
        let schedule = schedule();
        let split = |delimiter: Delimiter| -> Vec<Vec<String>> {
            let sep = delimiter.as_str().to_string();
            format_schedule(&schedule, &delimiter)
                .lines()
                .map(|line| line.split(sep.as_str()).map(str::to_string).collect())
                .collect()
        };

        let reference = split(Delimiter::Comma);
        for delimiter in Delimiter::supported() {
            assert_eq!(split(delimiter), reference);
        }
        assert_eq!(split(Delimiter::Custom(" :: ".to_string())), reference);
    }

    #[test]
    fn test_metadata_block() {
        let text = format_schedule_with_metadata(&schedule(), &terms(), &Delimiter::Comma, &fixed_time());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            &lines[..11],
            &[
                "# loan info",
                "principal,100000.00",
                "annual rate (%),5.00",
                "term (months),12",
                "monthly payment,8560.75",
                "total interest,2728.98",
                "total paid,102729.00",
                "exported at (UTC),2024-03-05 14:07:09",
                "",
                "# schedule",
                "month,principal,interest,total payment,remaining balance",
            ]
        );
        assert_eq!(lines[11], "1,8144.08,416.67,8560.75,91855.92");
        assert_eq!(lines.len(), 23);
    }

    #[test]
    fn test_metadata_with_empty_schedule() {
        let text = format_schedule_with_metadata(&Schedule::empty(), &terms(), &Delimiter::Tab, &fixed_time());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[4], "monthly payment\t0.00");
        assert_eq!(lines[5], "total interest\t0.00");
        assert_eq!(lines[6], "total paid\t0.00");
        assert_eq!(lines.last().copied(), Some("month\tprincipal\tinterest\ttotal payment\tremaining balance"));
    }

    #[test]
    fn test_czech_labels() {
        let formatter = ScheduleFormatter::new(ExportLabels::czech());
        let text = formatter.format_schedule_with_metadata(
            &schedule(),
            &terms(),
            &Delimiter::Semicolon,
            fixed_time().now(),
        );

        assert!(text.starts_with("# Informace o úvěru\nVýše úvěru;100000.00\n"));
        assert!(text.contains("\n# Splátkový kalendář\nMěsíc;Jistina;Úrok;Celkem;Zbývá\n"));
        assert!(text.contains("\nDatum exportu (UTC);2024-03-05 14:07:09\n"));
    }

    #[test]
    fn test_write_to_sink() {
        let formatter = ScheduleFormatter::default();
        let mut buffer: Vec<u8> = Vec::new();
        formatter
            .write_schedule_with_metadata(&mut buffer, &schedule(), &terms(), &Delimiter::Pipe, &fixed_time())
            .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("exported at (UTC)|2024-03-05 14:07:09\n"));
        assert!(text.ends_with("12|8525.21|35.52|8560.75|0.00\n"));
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_unwritable_sink_is_io_error() {
        let err = ScheduleFormatter::default()
            .write_schedule(&mut BrokenSink, &schedule(), &Delimiter::Comma)
            .unwrap_err();
        assert_eq!(err.to_string(), "disk full");
    }
}
