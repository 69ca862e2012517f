//! Common error types.

use std::{error, fmt};

/// An error that may be generated while configuring or constructing a [`Tracker`].
///
/// [`Tracker`]: crate::tracker::Tracker
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerError {
    /// No target elements were provided.
    MissingElements,
    /// The margin could not be parsed as a root margin.
    InvalidMargin(String),
    /// The backend refused to create a visibility observer.
    Observe(ObserveError),
}

impl From<ObserveError> for TrackerError {
    fn from(value: ObserveError) -> Self {
        Self::Observe(value)
    }
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            TrackerError::MissingElements => write!(f, "no elements were given to track"),
            TrackerError::InvalidMargin(margin) => write!(f, "invalid margin: {margin:?}"),
            TrackerError::Observe(e) => e.fmt(f),
        }
    }
}

impl error::Error for TrackerError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            TrackerError::Observe(e) => Some(e),
            _ => None,
        }
    }
}

/// The error type for when the host cannot create a visibility observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObserveError {
    message: String,
}

impl ObserveError {
    /// Create a new [`ObserveError`] with the message reported by the host.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// The message reported by the host.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ObserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.pad(&format!("failed to create visibility observer: {}", self.message))
    }
}

impl error::Error for ObserveError {}

#[cfg(test)]
mod tests {
    #![allow(clippy::redundant_clone)]

    use super::*;

    #[test]
    fn ensure_fmt_does_not_panic() {
        let _ = format!(
            "{:?}, {}, {}",
            TrackerError::MissingElements,
            TrackerError::InvalidMargin("10em".into()).clone(),
            TrackerError::from(ObserveError::new("SyntaxError")),
        );
    }

    #[test]
    fn observe_error_is_the_source() {
        use std::error::Error;

        let error = TrackerError::from(ObserveError::new("boom"));
        assert!(error.source().is_some());
        assert!(TrackerError::MissingElements.source().is_none());
        assert_eq!(
            error.to_string(),
            "failed to create visibility observer: boom"
        );
    }
}
