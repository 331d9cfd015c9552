//! Engine-level XML/HTTP glue that does not belong in `shuriken-rfc` itself:
//! href percent-encoding and MIME/content-type derivation from item/collection
//! tags (§4.2, §4.8).

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::storage::{CollectionTag, ItemTag};

/// Matches `urllib.parse.quote`'s default `safe="/"`: every byte is
/// percent-encoded except ASCII letters/digits, the "always safe" set
/// `_.-~`, and `/`.
const HREF_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'_').remove(b'.').remove(b'-').remove(b'~').remove(b'/');

/// Percent-encodes a sanitized path for use as an `{DAV:}href` body.
#[must_use]
pub fn make_href(path: &str) -> String {
    utf8_percent_encode(path, HREF_ENCODE_SET).to_string()
}

/// The bare MIME type for a leaf collection's tag (no charset/component).
#[must_use]
pub const fn collection_mime(tag: CollectionTag) -> &'static str {
    match tag {
        CollectionTag::Calendar => "text/calendar",
        CollectionTag::AddressBook => "text/vcard",
    }
}

/// The bare MIME type for an item's tag.
#[must_use]
pub const fn item_mime(tag: ItemTag) -> &'static str {
    match tag {
        ItemTag::VCard => "text/vcard",
        ItemTag::VEvent => "text/calendar",
    }
}

/// An item's `{DAV:}getcontenttype` property value: the bare MIME type with
/// charset and component parameters. Distinct from the plain MIME type GET
/// sends as the HTTP `Content-Type` header (§4.8).
#[must_use]
pub fn item_content_type(tag: ItemTag) -> String {
    format!("{};charset=utf-8;component={}", item_mime(tag), tag.as_str())
}

/// The filename a GET on a leaf collection proposes, per §4.8.
#[must_use]
pub fn collection_filename(slug: &str, tag: CollectionTag) -> String {
    let suffix = match tag {
        CollectionTag::Calendar => "ics",
        CollectionTag::AddressBook => "vcf",
    };
    format!("{slug}.{suffix}")
}

/// `Content-Disposition: attachment; filename*=utf-8''<name>`, percent-encoding
/// the filename per RFC 5987.
#[must_use]
pub fn content_disposition_attachment(filename: &str) -> String {
    let encoded = utf8_percent_encode(filename, HREF_ENCODE_SET).to_string();
    format!("attachment; filename*=utf-8''{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_href_encodes_spaces() {
        assert_eq!(make_href("/alice/my cal/"), "/alice/my%20cal/");
    }

    #[test]
    fn make_href_preserves_slashes() {
        assert_eq!(make_href("/alice/cal1/e1.ics"), "/alice/cal1/e1.ics");
    }

    #[test]
    fn make_href_encodes_at_sign() {
        assert_eq!(make_href("/alice/cal1/user@example.com.ics"), "/alice/cal1/user%40example.com.ics");
    }

    #[test]
    fn item_content_type_includes_component() {
        assert_eq!(item_content_type(ItemTag::VEvent), "text/calendar;charset=utf-8;component=VEVENT");
    }

    #[test]
    fn collection_filename_by_tag() {
        assert_eq!(collection_filename("cal1", CollectionTag::Calendar), "cal1.ics");
        assert_eq!(collection_filename("book1", CollectionTag::AddressBook), "book1.vcf");
    }
}
