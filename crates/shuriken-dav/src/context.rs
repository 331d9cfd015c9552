//! Per-request context (§3): headers, raw body, method, path, and a storage
//! handle. Built fresh by the dispatcher for every request; never shared.

use std::collections::HashMap;
use std::sync::Arc;

use crate::storage::Storage;

/// The request environment a handler needs, plus the storage handle it
/// dispatches against.
pub struct Context {
    pub method: String,
    pub path: String,
    /// Header names are lower-cased by the caller (the harness), matching
    /// HTTP's case-insensitive header semantics.
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
    pub storage: Arc<dyn Storage>,
}

impl Context {
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>, storage: Arc<dyn Storage>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers: HashMap::new(),
            body: Vec::new(),
            storage,
        }
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    #[must_use]
    pub fn depth_header(&self) -> Option<&str> {
        self.header("depth")
    }

    #[must_use]
    pub fn if_match(&self) -> Option<&str> {
        self.header("if-match")
    }

    #[must_use]
    pub fn if_none_match(&self) -> Option<&str> {
        self.header("if-none-match")
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }
}
