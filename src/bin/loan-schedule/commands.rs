use std::path::PathBuf;

use clap::{Args, ValueEnum};
use log::{debug, info};

use loan_schedule_rs::export::ensure_extension;
use loan_schedule_rs::{
    calculate, format_schedule, render, Delimiter, ExportConfig, LoanTerms, NumberFormat, Result,
    SafeTimeProvider, Schedule, ScheduleExporter, TimeSource,
};

use crate::output;

/// Loan parameters as typed by the user
#[derive(Args)]
pub struct LoanArgs {
    /// Amount borrowed
    #[arg(long, short = 'p')]
    pub principal: String,

    /// Annual interest rate in percent (5.0 means 5%)
    #[arg(long, short = 'r', allow_hyphen_values = true)]
    pub rate: String,

    /// Repayment term in months
    #[arg(long, short = 't', allow_hyphen_values = true)]
    pub term: String,
}

impl LoanArgs {
    fn terms(&self) -> Result<LoanTerms> {
        LoanTerms::parse(&self.principal, &self.rate, &self.term)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Delimited,
}

/// Arguments for printing a schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Separator for delimited output: comma, semicolon, tab, pipe or a literal string
    #[arg(long, default_value = "comma")]
    pub delimiter: String,

    /// Czech number formatting in the table
    #[arg(long)]
    pub czech: bool,
}

/// Arguments for exporting a schedule to a file
#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Destination file, `.csv` is appended when missing
    #[arg(long, short = 'o')]
    pub output: PathBuf,

    /// Separator: comma, semicolon, tab, pipe or a literal string
    #[arg(long)]
    pub delimiter: Option<String>,

    /// JSON export configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Czech labels and semicolon separator
    #[arg(long)]
    pub czech: bool,

    /// Skip the loan info block
    #[arg(long)]
    pub no_metadata: bool,
}

fn compute(loan: &LoanArgs) -> Result<(LoanTerms, Schedule)> {
    let terms = loan.terms()?;
    debug!(
        "calculating schedule: principal {}, rate {}, term {} months",
        terms.principal(),
        terms.annual_rate(),
        terms.term_months()
    );
    let schedule = calculate(&terms)?;
    debug!("monthly payment {}", schedule.monthly_payment());
    Ok((terms, schedule))
}

/// compute and render a schedule for stdout
pub fn run_schedule(args: &ScheduleArgs) -> Result<String> {
    let (_, schedule) = compute(&args.loan)?;

    match args.output {
        OutputFormat::Table => {
            let format = if args.czech {
                NumberFormat::czech()
            } else {
                NumberFormat::plain()
            };
            Ok(output::table(&render(&schedule, &format)))
        }
        OutputFormat::Json => Ok(format!("{}\n", schedule.json())),
        OutputFormat::Delimited => {
            let delimiter: Delimiter = args.delimiter.parse()?;
            Ok(format_schedule(&schedule, &delimiter))
        }
    }
}

fn export_config(args: &ExportArgs) -> Result<ExportConfig> {
    let mut config = match &args.config {
        Some(path) => {
            debug!("loading export configuration from {}", path.display());
            ExportConfig::from_json_file(path)?
        }
        None if args.czech => ExportConfig::czech(),
        None => ExportConfig::default(),
    };

    if let Some(delimiter) = &args.delimiter {
        config.delimiter = delimiter.parse()?;
    }
    if args.no_metadata {
        config.include_metadata = false;
    }

    Ok(config)
}

/// compute a schedule and write it to the requested file
pub fn run_export(args: &ExportArgs) -> Result<PathBuf> {
    let (terms, schedule) = compute(&args.loan)?;
    let config = export_config(args)?;
    let path = ensure_extension(&args.output, "csv");

    debug!(
        "exporting {} records to {} with delimiter {:?}",
        schedule.len(),
        path.display(),
        config.delimiter
    );

    let time = SafeTimeProvider::new(TimeSource::System);
    ScheduleExporter::new(config).export_to_file(&path, &schedule, &terms, &time)?;

    info!("exported {} records to {}", schedule.len(), path.display());
    Ok(path)
}
