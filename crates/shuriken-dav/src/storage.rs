//! The storage contract (§4.3) and the data model it serves (§3).
//!
//! This module defines the engine's view of collections and items, and the
//! `Storage` trait external collaborators implement. The trait splits into a
//! small required surface and a larger surface with default implementations
//! built from it, mirroring how the donor system separates a storage
//! backend's must-implement primitives from its derived convenience calls.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use shuriken_core::types::{CollectionTag, ItemTag};
pub use shuriken_rfc::dav::Depth;

use crate::error::DavResult;
use crate::path;

/// A named container for items: a calendar, an address book, or a plain
/// (principal) folder.
#[derive(Debug, Clone)]
pub struct Collection {
    /// Stable URI-safe identifier. May be empty only for the virtual root.
    pub slug: String,
    /// Display name. May be empty.
    pub name: String,
    /// Absent for a plain collection (e.g. a principal folder).
    pub tag: Option<CollectionTag>,
}

impl Collection {
    /// Any named collection reads as a principal, per the donor's
    /// `bool(slug)` predicate — see the design note on Open Question (a).
    #[must_use]
    pub fn is_principal(&self) -> bool {
        !self.slug.is_empty()
    }

    #[must_use]
    pub fn is_address_book(&self) -> bool {
        self.tag == Some(CollectionTag::AddressBook)
    }

    #[must_use]
    pub fn is_calendar(&self) -> bool {
        self.tag == Some(CollectionTag::Calendar)
    }

    /// A collection is a leaf iff it carries a tag.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.tag.is_some()
    }
}

/// A resource inside a [`Collection`].
#[derive(Debug, Clone)]
pub struct Item {
    /// `VCARD` or `VEVENT`.
    pub tag: ItemTag,
    /// Unique within its collection; a URL path segment, free of `/`.
    pub href: String,
    /// The owning collection. Always resolvable — an item is never orphaned.
    pub collection: Collection,
    pub last_modified: DateTime<Utc>,
}

/// Collection vs. item variance modeled as a two-variant tagged union, not
/// by inheritance — every PROPFIND/REPORT call site that would otherwise
/// test by runtime class matches on this instead.
#[derive(Debug, Clone)]
pub enum Entity {
    Collection(Collection),
    Item(Item),
}

impl Entity {
    #[must_use]
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Collection(_))
    }
}

/// Clamps a request's `Depth` header to what discovery actually supports:
/// `infinity` behaves as `One` (this engine never descends recursively,
/// §4.5), and a missing/unparseable header defaults to `Zero`.
#[must_use]
pub fn effective_depth(value: Option<&str>) -> Depth {
    match value.and_then(Depth::from_header) {
        Some(Depth::One | Depth::Infinity) => Depth::One,
        _ => Depth::Zero,
    }
}

/// The abstract contract over collections and items (§4.3). Consumed, not
/// implemented, by this crate; an in-memory reference implementation lives
/// in the test-tooling crate.
///
/// The required methods return `anyhow::Result`, not `DavResult`: a
/// backend's failure modes are not enumerable by this engine, so they cross
/// the trait boundary as opaque `anyhow::Error` and are downgraded to
/// `DavError::Storage` (a `400`) at the call site via `DavError`'s `#[from]`
/// conversion (§10.2). The derived default methods below return `DavResult`
/// and rely on that conversion through `?`.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Identity string of the caller (may be an anonymous literal).
    async fn user(&self) -> String;

    /// Ordered sequence of collections visible to the caller.
    async fn collection_list(&self) -> anyhow::Result<Vec<Collection>>;

    /// A single collection by slug, if it exists.
    async fn collection_get(&self, slug: &str) -> anyhow::Result<Option<Collection>>;

    /// Ordered sequence of items in a collection.
    async fn collection_items(&self, collection: &Collection) -> anyhow::Result<Vec<Item>>;

    /// A single item by href within a collection, if it exists.
    async fn item_get(&self, href: &str, collection: &Collection) -> anyhow::Result<Option<Item>>;

    /// Canonical textual form of an item's body.
    async fn item_serialize(&self, item: &Item) -> anyhow::Result<String>;

    /// Creates or replaces the item at `href`. `existing` is the item
    /// currently at that href, if any (for backends that need it to decide
    /// how to merge). Returns `Ok(None)` (treated as a failed upload, not a
    /// success) if the body is rejected.
    async fn item_upload(
        &self,
        href: &str,
        existing: Option<&Item>,
        collection: &Collection,
        body: &[u8],
    ) -> anyhow::Result<Option<Item>>;

    /// Deletes an item.
    async fn item_delete(&self, item: &Item) -> anyhow::Result<()>;

    /// A collection's ETag per I3: a function of `(href, item_etag)` across
    /// its items plus its own identifying fields.
    async fn collection_etag(&self, collection: &Collection) -> anyhow::Result<String>;

    /// An item's ETag per I4: a function of its canonical serialized body.
    async fn item_etag(&self, item: &Item) -> anyhow::Result<String>;

    /// Convenience over `split` + `item_get`.
    async fn item_get_from_path(&self, path: &str) -> DavResult<Option<Item>> {
        let (slug, href) = path::split(path);
        let Some(href) = href else {
            return Ok(None);
        };
        let Some(collection) = self.collection_get(&slug).await? else {
            return Ok(None);
        };
        Ok(self.item_get(&href, &collection).await?)
    }

    /// Discovery with depth, per §4.5. No recursive descent beyond depth 1.
    async fn discover(&self, path: &str, depth: Depth) -> DavResult<Vec<Entity>> {
        let (slug, href) = path::split(path);
        let user = self.user().await;

        if slug.is_empty() {
            let mut results = vec![Entity::Collection(Collection {
                slug: String::new(),
                name: String::new(),
                tag: None,
            })];
            if depth == Depth::One
                && let Some(principal) = self.collection_get(&user).await?
            {
                results.push(Entity::Collection(principal));
            }
            return Ok(results);
        }

        if slug == user && href.is_none() {
            let Some(principal) = self.collection_get(&slug).await? else {
                return Ok(Vec::new());
            };
            let mut results = vec![Entity::Collection(principal.clone())];
            if depth == Depth::One {
                for child in self.collection_list().await? {
                    if child.slug != principal.slug {
                        results.push(Entity::Collection(child));
                    }
                }
            }
            return Ok(results);
        }

        if let Some(collection) = self.collection_get(&slug).await? {
            if let Some(href) = href {
                return Ok(match self.item_get(&href, &collection).await? {
                    Some(item) => vec![Entity::Item(item)],
                    None => Vec::new(),
                });
            }
            let mut results = vec![Entity::Collection(collection.clone())];
            if depth == Depth::One {
                for item in self.collection_items(&collection).await? {
                    results.push(Entity::Item(item));
                }
            }
            return Ok(results);
        }

        Ok(match self.item_get_from_path(path).await? {
            Some(item) => vec![Entity::Item(item)],
            None => Vec::new(),
        })
    }

    /// The first result of `discover(path, Depth::Zero)`.
    async fn get(&self, path: &str) -> DavResult<Option<Entity>> {
        Ok(self.discover(path, Depth::Zero).await?.into_iter().next())
    }

    /// An item's serialization, or a collection's members' serializations
    /// joined by newlines.
    async fn serialize(&self, entity: &Entity) -> DavResult<String> {
        match entity {
            Entity::Item(item) => Ok(self.item_serialize(item).await?),
            Entity::Collection(collection) => {
                let items = self.collection_items(collection).await?;
                let mut parts = Vec::with_capacity(items.len());
                for item in &items {
                    parts.push(self.item_serialize(item).await?);
                }
                Ok(parts.join("\n"))
            }
        }
    }

    /// RFC 1123 GMT datetime string; for collections, the maximum of member
    /// `last_modified` values, or "now" if empty.
    async fn get_last_modified(&self, entity: &Entity) -> DavResult<String> {
        let instant = match entity {
            Entity::Item(item) => item.last_modified,
            Entity::Collection(collection) => {
                let items = self.collection_items(collection).await?;
                items.iter().map(|i| i.last_modified).max().unwrap_or_else(Utc::now)
            }
        };
        Ok(instant.to_rfc2822().replace("+0000", "GMT"))
    }
}
