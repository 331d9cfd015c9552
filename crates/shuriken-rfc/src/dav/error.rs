//! DAV error-body type: the `{DAV:}error` XML element carried in a response
//! when a method fails, as distinct from the engine's own HTTP-status error
//! taxonomy.

use std::fmt;

/// A precondition/postcondition error body, e.g. `{DAV:}error/{DAV:}supported-report`
/// emitted by the REPORT engine when a client asks for a report a collection
/// does not support.
#[derive(Debug, Clone)]
pub struct ErrorBody {
    /// HTTP status code.
    pub status: u16,
    /// Error description.
    pub message: String,
    /// Optional precondition/postcondition element name, namespaced `DAV:`.
    pub condition: Option<String>,
}

impl ErrorBody {
    /// Creates a new error body.
    #[must_use]
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            condition: None,
        }
    }

    /// Creates an error body with a `DAV:` condition element.
    #[must_use]
    pub fn with_condition(
        status: u16,
        message: impl Into<String>,
        condition: impl Into<String>,
    ) -> Self {
        Self {
            status,
            message: message.into(),
            condition: Some(condition.into()),
        }
    }

    /// 403 Forbidden with a `{DAV:}supported-report` condition.
    #[must_use]
    pub fn unsupported_report() -> Self {
        Self::with_condition(403, "unsupported report type", "supported-report")
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status, self.message)
    }
}

impl std::error::Error for ErrorBody {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_with_condition() {
        let err = ErrorBody::unsupported_report();
        assert_eq!(err.status, 403);
        assert_eq!(err.condition, Some("supported-report".to_string()));
    }

    #[test]
    fn error_display() {
        let err = ErrorBody::new(404, "Collection does not exist");
        assert_eq!(err.to_string(), "404 Collection does not exist");
    }
}
