//! The engine's error taxonomy (kinds, not wire formats — §7).
//!
//! Every handler returns `Result<Response, DavError>`; the dispatcher is the
//! single place that turns a `DavError` into a `(status, headers, body)`
//! triple, so `status_code` is the one source of truth other code should
//! consult.

use thiserror::Error;

/// An engine-level failure, already classified into the kinds §7 defines.
#[derive(Error, Debug)]
pub enum DavError {
    /// Malformed XML, unreadable body, or a storage upload exception.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Unsupported directory listing, or a REPORT/collection mismatch.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Missing item or collection during resolution.
    #[error("not found")]
    NotFound,

    /// Unknown method, or a PROPFIND that discovered nothing.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Body read exceeded the deadline.
    #[error("request timeout")]
    Timeout,

    /// PUT against a collection that does not exist.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A failed `If-Match`/`If-None-Match` evaluation.
    #[error("precondition failed")]
    PreconditionFailed,

    /// A storage-backend failure surfaced across the trait boundary.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl DavError {
    /// The single source of truth mapping a `DavError` kind to an HTTP
    /// status code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) | Self::Storage(_) => 400,
            Self::Forbidden(_) => 403,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::Timeout => 408,
            Self::Conflict(_) => 409,
            Self::PreconditionFailed => 412,
        }
    }

    /// A short plain-text body for non-XML error responses, per §7.
    #[must_use]
    pub fn plain_body(&self) -> String {
        self.to_string()
    }
}

pub type DavResult<T> = std::result::Result<T, DavError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(DavError::BadRequest("x".into()).status_code(), 400);
        assert_eq!(DavError::Forbidden("x".into()).status_code(), 403);
        assert_eq!(DavError::NotFound.status_code(), 404);
        assert_eq!(DavError::MethodNotAllowed.status_code(), 405);
        assert_eq!(DavError::Timeout.status_code(), 408);
        assert_eq!(DavError::Conflict("x".into()).status_code(), 409);
        assert_eq!(DavError::PreconditionFailed.status_code(), 412);
    }
}
