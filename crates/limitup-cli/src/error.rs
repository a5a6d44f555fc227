use limitup_core::{PipelineError, ReportError, SourceError, ValidationError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("market data unavailable: {0}")]
    Source(#[from] SourceError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

impl From<PipelineError> for CliError {
    fn from(error: PipelineError) -> Self {
        match error {
            PipelineError::Validation(error) => Self::Validation(error),
            PipelineError::Source(error) => Self::Source(error),
            PipelineError::Report(error) => Self::Report(error),
        }
    }
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Source(_) => 3,
            Self::Report(ReportError::Serialization(_)) => 4,
            Self::Report(ReportError::Io { .. }) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_exit_with_usage_code() {
        let error = CliError::from(ValidationError::InvalidDateFormat {
            value: String::from("2025-06-18"),
        });
        assert_eq!(error.exit_code(), 2);
        assert_eq!(error.to_string(), "date must be YYYYMMDD: '2025-06-18'");
    }

    #[test]
    fn provider_outage_is_distinct_from_input_errors() {
        let error = CliError::from(PipelineError::Source(SourceError::unavailable("krx down")));
        assert_eq!(error.exit_code(), 3);
        assert!(error.to_string().contains("krx down"));
    }
}
