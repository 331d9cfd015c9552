/// Discriminates a collection's kind. A collection with no tag is a plain
/// (principal) folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionTag {
    Calendar,
    AddressBook,
}

impl CollectionTag {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calendar => "calendar",
            Self::AddressBook => "addressbook",
        }
    }
}

impl std::fmt::Display for CollectionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discriminates an item's body kind. Every item carries exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemTag {
    VCard,
    VEvent,
}

impl ItemTag {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VCard => "VCARD",
            Self::VEvent => "VEVENT",
        }
    }
}

impl std::fmt::Display for ItemTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
