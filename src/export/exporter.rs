use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use hourglass_rs::SafeTimeProvider;

use crate::config::ExportConfig;
use crate::errors::{Result, ScheduleError};
use crate::export::formatter::ScheduleFormatter;
use crate::payments::Schedule;
use crate::types::LoanTerms;

/// writes formatted schedules to files or other sinks
#[derive(Debug, Clone, Default)]
pub struct ScheduleExporter {
    config: ExportConfig,
    formatter: ScheduleFormatter,
}

impl ScheduleExporter {
    pub fn new(config: ExportConfig) -> Self {
        let formatter = ScheduleFormatter::new(config.labels.clone());
        Self { config, formatter }
    }

    /// render according to the configuration without touching any sink
    pub fn render(
        &self,
        schedule: &Schedule,
        terms: &LoanTerms,
        time_provider: &SafeTimeProvider,
    ) -> String {
        if self.config.include_metadata {
            self.formatter.format_schedule_with_metadata(
                schedule,
                terms,
                &self.config.delimiter,
                time_provider.now(),
            )
        } else {
            self.formatter.format_schedule(schedule, &self.config.delimiter)
        }
    }

    /// Write to any sink; `label` names the sink in errors.
    pub fn export_to_writer<W: Write>(
        &self,
        sink: &mut W,
        label: impl Into<PathBuf>,
        schedule: &Schedule,
        terms: &LoanTerms,
        time_provider: &SafeTimeProvider,
    ) -> Result<()> {
        let text = self.render(schedule, terms, time_provider);
        sink.write_all(text.as_bytes())
            .and_then(|_| sink.flush())
            .map_err(|source| ScheduleError::SinkUnavailable {
                path: label.into(),
                source,
            })
    }

    /// Create or truncate `path` and write the export.
    ///
    /// The file handle is dropped on every return path. No temp-file rename
    /// is attempted, so a failed write can leave a partial file.
    pub fn export_to_file(
        &self,
        path: impl AsRef<Path>,
        schedule: &Schedule,
        terms: &LoanTerms,
        time_provider: &SafeTimeProvider,
    ) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| ScheduleError::SinkUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

        let mut writer = BufWriter::new(file);
        self.export_to_writer(&mut writer, path, schedule, terms, time_provider)
    }
}

/// append `.extension` unless the path already ends with it (case-insensitive)
pub fn ensure_extension(path: impl AsRef<Path>, extension: &str) -> PathBuf {
    let path = path.as_ref();
    let has_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false);

    if has_extension {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_os_string();
        name.push(".");
        name.push(extension);
        PathBuf::from(name)
    }
}
