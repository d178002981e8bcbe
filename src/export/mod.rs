pub mod exporter;
pub mod formatter;

pub use exporter::{ensure_extension, ScheduleExporter};
pub use formatter::{format_schedule, format_schedule_with_metadata, ScheduleFormatter, TIMESTAMP_FORMAT};
