use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::decimal::{round_half_up, Money, MONEY_DP};
use crate::errors::{Result, ScheduleError};

/// field separator for delimited output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    Comma,
    Semicolon,
    Tab,
    Pipe,
    /// any other separator, used verbatim
    Custom(String),
}

impl Delimiter {
    pub fn as_str(&self) -> &str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Semicolon => ";",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
            Delimiter::Custom(s) => s,
        }
    }

    /// the four separators offered to users
    pub fn supported() -> [Delimiter; 4] {
        [
            Delimiter::Comma,
            Delimiter::Semicolon,
            Delimiter::Tab,
            Delimiter::Pipe,
        ]
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Delimiter::Comma
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Delimiter {
    type Err = ScheduleError;

    /// accepts a name (`comma`, `semicolon`, `tab`, `pipe`) or the literal separator
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "comma" | "," => Ok(Delimiter::Comma),
            "semicolon" | ";" => Ok(Delimiter::Semicolon),
            "tab" | "\t" | "\\t" => Ok(Delimiter::Tab),
            "pipe" | "|" => Ok(Delimiter::Pipe),
            "" => Err(ScheduleError::InvalidConfiguration {
                message: "delimiter must not be empty".to_string(),
            }),
            _ => Ok(Delimiter::Custom(s.to_string())),
        }
    }
}

/// text of every marker, key and column header in an export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportLabels {
    pub loan_info_marker: String,
    pub schedule_marker: String,
    pub principal: String,
    pub annual_rate: String,
    pub term_months: String,
    pub monthly_payment: String,
    pub total_interest: String,
    pub total_paid: String,
    pub exported_at: String,
    pub columns: ColumnLabels,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLabels {
    pub month: String,
    pub principal: String,
    pub interest: String,
    pub total_payment: String,
    pub remaining_balance: String,
}

impl ColumnLabels {
    pub fn as_array(&self) -> [&str; 5] {
        [
            self.month.as_str(),
            self.principal.as_str(),
            self.interest.as_str(),
            self.total_payment.as_str(),
            self.remaining_balance.as_str(),
        ]
    }
}

impl Default for ExportLabels {
    fn default() -> Self {
        Self {
            loan_info_marker: "# loan info".to_string(),
            schedule_marker: "# schedule".to_string(),
            principal: "principal".to_string(),
            annual_rate: "annual rate (%)".to_string(),
            term_months: "term (months)".to_string(),
            monthly_payment: "monthly payment".to_string(),
            total_interest: "total interest".to_string(),
            total_paid: "total paid".to_string(),
            exported_at: "exported at (UTC)".to_string(),
            columns: ColumnLabels {
                month: "month".to_string(),
                principal: "principal".to_string(),
                interest: "interest".to_string(),
                total_payment: "total payment".to_string(),
                remaining_balance: "remaining balance".to_string(),
            },
        }
    }
}

impl ExportLabels {
    /// labels of the Czech desktop calculator
    pub fn czech() -> Self {
        Self {
            loan_info_marker: "# Informace o úvěru".to_string(),
            schedule_marker: "# Splátkový kalendář".to_string(),
            principal: "Výše úvěru".to_string(),
            annual_rate: "Roční úrok (%)".to_string(),
            term_months: "Doba splácení (měsíce)".to_string(),
            monthly_payment: "Pravidelná splátka".to_string(),
            total_interest: "Zaplacené úroky".to_string(),
            total_paid: "Celkem zaplaceno".to_string(),
            exported_at: "Datum exportu (UTC)".to_string(),
            columns: ColumnLabels {
                month: "Měsíc".to_string(),
                principal: "Jistina".to_string(),
                interest: "Úrok".to_string(),
                total_payment: "Celkem".to_string(),
                remaining_balance: "Zbývá".to_string(),
            },
        }
    }
}

/// export configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub delimiter: Delimiter,
    pub labels: ExportLabels,
    pub include_metadata: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Comma,
            labels: ExportLabels::default(),
            include_metadata: true,
        }
    }
}

impl ExportConfig {
    /// semicolon-separated export with Czech labels
    pub fn czech() -> Self {
        Self {
            delimiter: Delimiter::Semicolon,
            labels: ExportLabels::czech(),
            include_metadata: true,
        }
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ExportConfig = serde_json::from_str(json).map_err(|e| {
            ScheduleError::InvalidConfiguration {
                message: e.to_string(),
            }
        })?;

        if config.delimiter.as_str().is_empty() {
            return Err(ScheduleError::InvalidConfiguration {
                message: "delimiter must not be empty".to_string(),
            });
        }

        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ScheduleError::InvalidConfiguration {
            message: format!("failed to read '{}': {}", path.display(), e),
        })?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Display locale for on-screen amounts.
///
/// Passed explicitly to every formatting call; nothing is kept in
/// process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    pub decimal_separator: char,
    pub grouping_separator: Option<char>,
    pub grouping_size: usize,
    pub currency_suffix: String,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::plain()
    }
}

impl NumberFormat {
    /// `1234567.89`
    pub fn plain() -> Self {
        Self {
            decimal_separator: '.',
            grouping_separator: None,
            grouping_size: 3,
            currency_suffix: String::new(),
        }
    }

    /// `1 234 567,89 Kč`
    pub fn czech() -> Self {
        Self {
            decimal_separator: ',',
            grouping_separator: Some(' '),
            grouping_size: 3,
            currency_suffix: " Kč".to_string(),
        }
    }

    /// amount with two fractional digits, grouped
    pub fn format(&self, amount: Money) -> String {
        let rounded = round_half_up(amount.as_decimal(), MONEY_DP);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let plain = format!("{:.2}", rounded.abs());
        let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

        let mut out = String::with_capacity(plain.len() + 8);
        if negative {
            out.push('-');
        }
        out.push_str(&self.group_digits(int_part));
        out.push(self.decimal_separator);
        out.push_str(frac_part);
        out
    }

    /// amount followed by the currency suffix
    pub fn format_currency(&self, amount: Money) -> String {
        let mut out = self.format(amount);
        out.push_str(&self.currency_suffix);
        out
    }

    fn group_digits(&self, digits: &str) -> String {
        let separator = match self.grouping_separator {
            Some(sep) if self.grouping_size > 0 => sep,
            _ => return digits.to_string(),
        };

        let len = digits.len();
        let mut out = String::with_capacity(len + len / self.grouping_size);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (len - i) % self.grouping_size == 0 {
                out.push(separator);
            }
            out.push(ch);
        }
        out
    }
}
