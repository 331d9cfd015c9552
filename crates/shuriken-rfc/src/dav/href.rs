//! DAV href type.

use std::fmt;

/// A `WebDAV` href (URL reference).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Href(pub String);

impl Href {
    /// Creates a new href.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the href as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether this href ends with a slash.
    #[must_use]
    pub fn is_collection(&self) -> bool {
        self.0.ends_with('/')
    }

    /// Joins a child path, inserting a separating slash if necessary.
    #[must_use]
    pub fn join(&self, child: &str) -> Self {
        if self.0.ends_with('/') {
            Self(format!("{}{}", self.0, child.trim_start_matches('/')))
        } else {
            Self(format!("{}/{}", self.0, child.trim_start_matches('/')))
        }
    }

    /// Ensures the href ends with a slash (for collections).
    #[must_use]
    pub fn with_trailing_slash(self) -> Self {
        if self.0.ends_with('/') {
            self
        } else {
            Self(format!("{}/", self.0))
        }
    }
}

impl fmt::Display for Href {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Href {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Href {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Href {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn href_new() {
        let href = Href::new("/calendars/user/");
        assert_eq!(href.as_str(), "/calendars/user/");
    }

    #[test]
    fn href_is_collection() {
        assert!(Href::new("/calendars/").is_collection());
        assert!(!Href::new("/calendars/event.ics").is_collection());
    }

    #[test]
    fn href_join() {
        let base = Href::new("/calendars/");
        let joined = base.join("user/cal/");
        assert_eq!(joined.as_str(), "/calendars/user/cal/");
    }

    #[test]
    fn href_trailing_slash() {
        let href = Href::new("/calendars").with_trailing_slash();
        assert_eq!(href.as_str(), "/calendars/");
    }
}
