//! Error types for civiltime conversions.

use thiserror::Error;

/// The failure classes a conversion can signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input text or a tuple form does not match the required structural
    /// layout (wrong shape, missing delimiters, invalid arity).
    Format,
    /// Structurally valid input with semantically invalid calendar or zone
    /// values (month 13, Feb 30, an unresolvable zone id).
    Calendar,
    /// A requested fractional-second precision exceeds the supported bound.
    Precision,
}

/// A conversion failure: a kind from the taxonomy, a message, and an
/// optional detail string the host can surface separately.
///
/// Errors are raised synchronously at the point of detection; a failed
/// conversion never yields a partial record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("{message}")]
    Format {
        message: String,
        detail: Option<String>,
    },
    #[error("{message}")]
    Calendar {
        message: String,
        detail: Option<String>,
    },
    #[error("{message}")]
    Precision {
        message: String,
        detail: Option<String>,
    },
}

impl TimeError {
    pub fn format(message: impl Into<String>) -> Self {
        TimeError::Format {
            message: message.into(),
            detail: None,
        }
    }

    pub fn format_with(message: impl Into<String>, detail: impl Into<String>) -> Self {
        TimeError::Format {
            message: message.into(),
            detail: Some(detail.into()),
        }
    }

    pub fn calendar(message: impl Into<String>) -> Self {
        TimeError::Calendar {
            message: message.into(),
            detail: None,
        }
    }

    pub fn calendar_with(message: impl Into<String>, detail: impl Into<String>) -> Self {
        TimeError::Calendar {
            message: message.into(),
            detail: Some(detail.into()),
        }
    }

    pub fn precision(message: impl Into<String>) -> Self {
        TimeError::Precision {
            message: message.into(),
            detail: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TimeError::Format { .. } => ErrorKind::Format,
            TimeError::Calendar { .. } => ErrorKind::Calendar,
            TimeError::Precision { .. } => ErrorKind::Precision,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            TimeError::Format { message, .. }
            | TimeError::Calendar { message, .. }
            | TimeError::Precision { message, .. } => message,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            TimeError::Format { detail, .. }
            | TimeError::Calendar { detail, .. }
            | TimeError::Precision { detail, .. } => detail.as_deref(),
        }
    }
}

/// Classify an engine parse failure: out-of-range or impossible field
/// combinations are calendar errors, everything else is a layout mismatch.
pub(crate) fn classify_parse_error(input: &str, err: chrono::format::ParseError) -> TimeError {
    use chrono::format::ParseErrorKind;

    match err.kind() {
        ParseErrorKind::OutOfRange | ParseErrorKind::Impossible => TimeError::calendar_with(
            format!("'{input}' carries out-of-range or impossible calendar fields"),
            err.to_string(),
        ),
        _ => TimeError::format_with(
            format!("'{input}' does not match the expected layout"),
            err.to_string(),
        ),
    }
}

pub type Result<T> = std::result::Result<T, TimeError>;
