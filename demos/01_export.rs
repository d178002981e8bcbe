/// export - delimited text with a loan info block, written to a temp file
use loan_schedule_rs::chrono::{TimeZone, Utc};
use loan_schedule_rs::export::ensure_extension;
use loan_schedule_rs::{
    calculate, format_schedule, Delimiter, ExportConfig, LoanTerms, SafeTimeProvider,
    ScheduleExporter, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let terms = LoanTerms::parse("250000", "6.5", "360")?;
    let schedule = calculate(&terms)?;

    // the plain table with each supported separator
    for delimiter in Delimiter::supported() {
        let text = format_schedule(&schedule, &delimiter);
        println!("{:?}: {}", delimiter, text.lines().nth(1).unwrap_or_default());
    }

    // fixed clock so the export is reproducible
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
    ));

    let exporter = ScheduleExporter::new(ExportConfig::czech());
    let path = ensure_extension(std::env::temp_dir().join("mortgage"), "csv");
    exporter.export_to_file(&path, &schedule, &terms, &time)?;

    println!("\nwritten to {}", path.display());
    println!("{}", exporter.render(&schedule, &terms, &time).lines().take(12).collect::<Vec<_>>().join("\n"));

    Ok(())
}
