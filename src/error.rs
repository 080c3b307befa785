use thiserror::Error;

/// Every failure the binary can report, each tied to a process exit code.
///
/// - `2`: bad input (arguments, prompts, local files)
/// - `3`: nothing to plot
/// - `4`: network, response, rendering, or terminal failures
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Usage(String),

    #[error("Canceled.")]
    Canceled,

    #[error("Invalid date key '{0}': expected 8 digits (yyyymmdd).")]
    InvalidDateKey(String),

    #[error("{context} '{path}': {source}")]
    File {
        context: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No data points between {min} and {max} (both excluded).")]
    EmptyWindow { min: i64, max: i64 },

    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} failed with status {status}.")]
    Status { url: String, status: reqwest::StatusCode },

    #[error("Invalid response from {origin}: {message}")]
    Payload { origin: String, message: String },

    #[error("Running total overflowed at {0}.")]
    Overflow(String),

    #[error("Failed to render chart: {0}")]
    Render(String),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    pub fn file(context: &'static str, path: &std::path::Path, source: std::io::Error) -> Self {
        Self::File {
            context,
            path: path.display().to_string(),
            source,
        }
    }

    pub fn payload(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Payload {
            origin: origin.into(),
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Usage(_)
            | AppError::Canceled
            | AppError::InvalidDateKey(_)
            | AppError::File { .. } => 2,
            AppError::EmptyWindow { .. } => 3,
            AppError::Http { .. }
            | AppError::Status { .. }
            | AppError::Payload { .. }
            | AppError::Overflow(_)
            | AppError::Render(_)
            | AppError::Terminal(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_group_by_cause() {
        assert_eq!(AppError::usage("bad").exit_code(), 2);
        assert_eq!(AppError::Canceled.exit_code(), 2);
        assert_eq!(AppError::EmptyWindow { min: 1, max: 2 }.exit_code(), 3);
        assert_eq!(AppError::payload("x", "y").exit_code(), 4);
        assert_eq!(AppError::Terminal("gone".into()).exit_code(), 4);
    }

    #[test]
    fn empty_window_message_names_bounds() {
        let msg = AppError::EmptyWindow { min: 20210100, max: 20210104 }.to_string();
        assert_eq!(msg, "No data points between 20210100 and 20210104 (both excluded).");
    }
}
