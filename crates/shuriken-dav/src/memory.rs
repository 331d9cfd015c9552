//! An in-memory reference [`Storage`] implementation (§10.4). Not part of
//! the protocol core — it exists so the demonstration binary and the
//! integration-test crate have a backend to exercise the engine against
//! without standing up a real one.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use crate::storage::{Collection, CollectionTag, Item, ItemTag, Storage};

struct StoredItem {
    item: Item,
    body: String,
}

struct StoredCollection {
    collection: Collection,
    items: BTreeMap<String, StoredItem>,
}

/// A `Storage` backed by process memory, keyed by collection slug. State is
/// lost on restart; this is a fixture, not a durable backend. Collections
/// and items are kept in `BTreeMap`s, not `HashMap`s, so iteration order —
/// and therefore `collection_etag`'s hash input — is deterministic across
/// instances and process restarts (§3 I3).
pub struct MemoryStorage {
    user: String,
    collections: RwLock<BTreeMap<String, StoredCollection>>,
}

impl MemoryStorage {
    /// Creates an empty store for the given user, with that user's own
    /// principal collection already present (mirroring the donor's
    /// `discover_iter`, which always treats `self.user` as a collection).
    #[must_use]
    pub fn new(user: impl Into<String>) -> Self {
        let user = user.into();
        let mut collections = BTreeMap::new();
        collections.insert(
            user.clone(),
            StoredCollection {
                collection: Collection {
                    slug: user.clone(),
                    name: String::new(),
                    tag: None,
                },
                items: BTreeMap::new(),
            },
        );
        Self {
            user,
            collections: RwLock::new(collections),
        }
    }

    /// Registers a new leaf collection (calendar or address book).
    pub async fn add_collection(&self, slug: impl Into<String>, name: impl Into<String>, tag: CollectionTag) {
        let slug = slug.into();
        self.collections.write().await.insert(
            slug.clone(),
            StoredCollection {
                collection: Collection {
                    slug,
                    name: name.into(),
                    tag: Some(tag),
                },
                items: BTreeMap::new(),
            },
        );
    }
}

fn sha256_quoted(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    format!("\"{digest:x}\"")
}

fn item_tag_for(collection_tag: CollectionTag) -> ItemTag {
    match collection_tag {
        CollectionTag::Calendar => ItemTag::VEvent,
        CollectionTag::AddressBook => ItemTag::VCard,
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn user(&self) -> String {
        self.user.clone()
    }

    async fn collection_list(&self) -> anyhow::Result<Vec<Collection>> {
        Ok(self.collections.read().await.values().map(|c| c.collection.clone()).collect())
    }

    async fn collection_get(&self, slug: &str) -> anyhow::Result<Option<Collection>> {
        Ok(self.collections.read().await.get(slug).map(|c| c.collection.clone()))
    }

    async fn collection_items(&self, collection: &Collection) -> anyhow::Result<Vec<Item>> {
        Ok(self
            .collections
            .read()
            .await
            .get(&collection.slug)
            .map(|c| c.items.values().map(|i| i.item.clone()).collect())
            .unwrap_or_default())
    }

    async fn item_get(&self, href: &str, collection: &Collection) -> anyhow::Result<Option<Item>> {
        Ok(self
            .collections
            .read()
            .await
            .get(&collection.slug)
            .and_then(|c| c.items.get(href))
            .map(|stored| stored.item.clone()))
    }

    async fn item_serialize(&self, item: &Item) -> anyhow::Result<String> {
        let collections = self.collections.read().await;
        let stored = collections
            .get(&item.collection.slug)
            .and_then(|c| c.items.get(&item.href))
            .ok_or_else(|| anyhow::anyhow!("item {} vanished from collection {}", item.href, item.collection.slug))?;
        Ok(stored.body.clone())
    }

    async fn item_upload(
        &self,
        href: &str,
        _existing: Option<&Item>,
        collection: &Collection,
        body: &[u8],
    ) -> anyhow::Result<Option<Item>> {
        let body = String::from_utf8(body.to_vec())?;
        let mut collections = self.collections.write().await;
        let Some(stored_collection) = collections.get_mut(&collection.slug) else {
            return Ok(None);
        };
        let tag = stored_collection.collection.tag.map_or(ItemTag::VEvent, item_tag_for);
        let item = Item {
            tag,
            href: href.to_string(),
            collection: stored_collection.collection.clone(),
            last_modified: Utc::now(),
        };
        stored_collection.items.insert(href.to_string(), StoredItem { item: item.clone(), body });
        Ok(Some(item))
    }

    async fn item_delete(&self, item: &Item) -> anyhow::Result<()> {
        if let Some(stored_collection) = self.collections.write().await.get_mut(&item.collection.slug) {
            stored_collection.items.remove(&item.href);
        }
        Ok(())
    }

    async fn collection_etag(&self, collection: &Collection) -> anyhow::Result<String> {
        let items = self.collection_items(collection).await?;
        let mut hashed = String::new();
        for item in &items {
            hashed.push_str(&item.href);
            hashed.push('/');
            hashed.push_str(&self.item_etag(item).await?);
        }
        hashed.push_str(&format!("{:?}", (&collection.slug, &collection.name, collection.tag)));
        Ok(sha256_quoted(&hashed))
    }

    async fn item_etag(&self, item: &Item) -> anyhow::Result<String> {
        Ok(sha256_quoted(&self.item_serialize(item).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Entity;

    #[tokio::test]
    async fn round_trips_an_uploaded_item() {
        let storage = MemoryStorage::new("alice");
        storage.add_collection("cal1", "Calendar", CollectionTag::Calendar).await;
        let collection = storage.collection_get("cal1").await.unwrap().unwrap();

        let uploaded = storage
            .item_upload("e1.ics", None, &collection, b"BEGIN:VEVENT\nEND:VEVENT")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(uploaded.tag, ItemTag::VEvent);

        let fetched = storage.item_get("e1.ics", &collection).await.unwrap().unwrap();
        assert_eq!(storage.item_serialize(&fetched).await.unwrap(), "BEGIN:VEVENT\nEND:VEVENT");
    }

    #[tokio::test]
    async fn discover_root_lists_principal_at_depth_one() {
        let storage = MemoryStorage::new("alice");
        storage.add_collection("cal1", "Calendar", CollectionTag::Calendar).await;

        let entities = storage.discover("/", crate::storage::Depth::One).await.unwrap();
        assert!(entities.iter().any(|e| matches!(e, Entity::Collection(c) if c.slug == "alice")));
    }

    #[tokio::test]
    async fn deleting_an_item_removes_it() {
        let storage = MemoryStorage::new("alice");
        storage.add_collection("cal1", "Calendar", CollectionTag::Calendar).await;
        let collection = storage.collection_get("cal1").await.unwrap().unwrap();
        let item = storage
            .item_upload("e1.ics", None, &collection, b"BEGIN:VEVENT\nEND:VEVENT")
            .await
            .unwrap()
            .unwrap();

        storage.item_delete(&item).await.unwrap();
        assert!(storage.item_get("e1.ics", &collection).await.unwrap().is_none());
    }
}
