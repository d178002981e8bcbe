pub mod config;
pub mod decimal;
pub mod display;
pub mod errors;
pub mod export;
pub mod payments;
pub mod types;

// re-export key types
pub use config::{Delimiter, ExportConfig, ExportLabels, NumberFormat};
pub use decimal::{Money, Rate};
pub use display::{render, DisplayModel, DisplayRow, PaymentSplit};
pub use errors::{Result, ScheduleError};
pub use export::{format_schedule, format_schedule_with_metadata, ScheduleExporter, ScheduleFormatter};
pub use payments::{calculate, AmortizationEngine, Schedule, ScheduleSummary};
pub use types::{LoanTerms, PaymentRecord, MAX_TERM_MONTHS};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
