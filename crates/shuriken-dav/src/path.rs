//! URI path sanitation, splitting, and reconstruction (§4.1).

/// Normalizes a URI path to an absolute, safe form: resolves `.`/`..` and
/// repeated separators, keeping only non-empty, non-`.`/`..` segments.
/// Preserves a trailing slash if the input had one. Never fails outward —
/// a degenerate input (e.g. `"/../.."`) collapses to `/`.
#[must_use]
pub fn sanitize(raw: &str) -> String {
    let trailing = raw.len() > 1 && raw.ends_with('/');

    let mut stack: Vec<&str> = Vec::new();
    for segment in raw.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            safe => stack.push(safe),
        }
    }

    let mut result = format!("/{}", stack.join("/"));
    if trailing && !result.ends_with('/') {
        result.push('/');
    }
    result
}

/// Splits a sanitized path into its collection slug and, if present, the
/// item href within that collection.
#[must_use]
pub fn split(path: &str) -> (String, Option<String>) {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return (String::new(), None);
    }

    match trimmed.split_once('/') {
        Some((slug, rest)) => {
            let rest = rest.trim_matches('/');
            if rest.is_empty() {
                (slug.to_string(), None)
            } else {
                (slug.to_string(), Some(rest.to_string()))
            }
        }
        None => (trimmed.to_string(), None),
    }
}

/// Reconstructs a leading-slash-prefixed path from a slug (or
/// slug-plus-href), optionally appending a trailing slash.
#[must_use]
pub fn unstrip(slug: &str, trailing: bool) -> String {
    let mut result = format!("/{slug}");
    if trailing && !result.ends_with('/') {
        result.push('/');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_basic() {
        assert_eq!(sanitize("/alice/cal1/"), "/alice/cal1/");
        assert_eq!(sanitize("/alice/cal1"), "/alice/cal1");
    }

    #[test]
    fn sanitize_collapses_dot_segments() {
        assert_eq!(sanitize("/alice/./cal1/"), "/alice/cal1/");
        assert_eq!(sanitize("/alice//cal1"), "/alice/cal1");
    }

    #[test]
    fn sanitize_resolves_dotdot() {
        assert_eq!(sanitize("/alice/cal1/../cal2/"), "/alice/cal2/");
    }

    #[test]
    fn sanitize_fails_closed_above_root() {
        assert_eq!(sanitize("/../../etc/passwd"), "/etc/passwd");
        assert_eq!(sanitize("/../.."), "/");
    }

    #[test]
    fn split_collection_only() {
        assert_eq!(split("/alice/"), ("alice".to_string(), None));
        assert_eq!(split("/alice"), ("alice".to_string(), None));
    }

    #[test]
    fn split_collection_and_item() {
        assert_eq!(
            split("/alice/cal1/e1.ics"),
            ("alice".to_string(), Some("cal1/e1.ics".to_string()))
        );
    }

    #[test]
    fn split_empty() {
        assert_eq!(split("/"), (String::new(), None));
    }

    #[test]
    fn unstrip_roundtrip() {
        let path = "/alice/cal1/";
        let (slug, _) = split(path);
        assert_eq!(sanitize(&unstrip(&slug, true)), path);
    }
}
