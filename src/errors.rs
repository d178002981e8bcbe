use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("invalid {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },

    #[error("arithmetic degenerate: {message}")]
    ArithmeticDegenerate {
        message: String,
    },

    #[error("cannot write to {path}: {source}")]
    SinkUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

impl ScheduleError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        ScheduleError::InvalidInput {
            field,
            message: message.into(),
        }
    }

    pub(crate) fn degenerate(message: impl Into<String>) -> Self {
        ScheduleError::ArithmeticDegenerate {
            message: message.into(),
        }
    }

    /// true for errors caused by caller-supplied loan parameters
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ScheduleError::InvalidInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ScheduleError::invalid("term", "must be at least 1 month");
        assert_eq!(err.to_string(), "invalid term: must be at least 1 month");
        assert!(err.is_invalid_input());

        let err = ScheduleError::SinkUnavailable {
            path: PathBuf::from("/nope/out.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing directory"),
        };
        assert_eq!(err.to_string(), "cannot write to /nope/out.csv: missing directory");
        assert!(!err.is_invalid_input());
    }
}
