//! Liked recipes, persisted across sessions.
//!
//! The whole collection is rewritten to its [`LikesStore`] after every
//! change. Storage problems never reach the caller: a failed write is
//! logged, and an unreadable store loads as an empty collection.

use log::{debug, warn};

use crate::model::Like;

mod storage;

pub use self::storage::{FileStore, LikesStore, MemoryStore};

/// Key under which the likes collection is stored.
pub const LIKES_STORAGE_KEY: &str = "likes";

pub struct LikesCollection {
    likes: Vec<Like>,
    store: Box<dyn LikesStore>,
}

impl LikesCollection {
    /// An empty collection that persists to `store`. Nothing is read.
    pub fn new(store: Box<dyn LikesStore>) -> Self {
        Self {
            likes: Vec::new(),
            store,
        }
    }

    /// Restore the collection from `store`.
    ///
    /// Missing or malformed data yields an empty collection. Duplicate ids
    /// keep their first occurrence.
    pub fn read_storage(store: Box<dyn LikesStore>) -> Self {
        let mut collection = Self::new(store);

        let data = match collection.store.read_all() {
            Ok(Some(data)) => data,
            Ok(None) => {
                debug!("No stored likes found");
                return collection;
            }
            Err(e) => {
                warn!("Failed to read stored likes: {}", e);
                return collection;
            }
        };

        match serde_json::from_str::<Vec<Like>>(&data) {
            Ok(likes) => {
                for like in likes {
                    if !collection.is_liked(&like.id) {
                        collection.likes.push(like);
                    }
                }
                debug!("Restored {} likes", collection.likes.len());
            }
            Err(e) => warn!("Ignoring malformed stored likes: {}", e),
        }

        collection
    }

    /// Add a like. Returns `false` if the id was already liked.
    pub fn add(&mut self, like: Like) -> bool {
        if self.is_liked(&like.id) {
            return false;
        }
        self.likes.push(like);
        self.persist();
        true
    }

    /// Remove a like by id, returning it if present.
    pub fn delete(&mut self, id: &str) -> Option<Like> {
        let index = self.likes.iter().position(|like| like.id == id)?;
        let removed = self.likes.remove(index);
        self.persist();
        Some(removed)
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.likes.iter().any(|like| like.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Like> {
        self.likes.iter().find(|like| like.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Like> {
        self.likes.iter()
    }

    pub fn len(&self) -> usize {
        self.likes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.likes.is_empty()
    }

    fn persist(&self) {
        let data = match serde_json::to_string(&self.likes) {
            Ok(data) => data,
            Err(e) => {
                warn!("Failed to serialize likes: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.write_all(&data) {
            warn!("Failed to persist likes: {}", e);
        }
    }
}
