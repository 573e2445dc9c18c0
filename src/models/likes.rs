use std::sync::Arc;

use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{ForkifyError, Result};
use crate::storage::KeyValueStore;

/// Storage key holding the liked-recipes collection
pub const LIKES_KEY: &str = "forkify.likes";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikedRecipe {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
}

/// Bookmarked recipes keyed by recipe id, persisted across sessions
pub struct Likes {
    likes: IndexMap<String, LikedRecipe>,
    store: Arc<dyn KeyValueStore>,
}

impl Likes {
    /// An empty collection backed by `store`; call [`Likes::restore`] to load it
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            likes: IndexMap::new(),
            store,
        }
    }

    /// Record a like for `id`, replacing any existing entry for it
    pub fn add_like(
        &mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        img: impl Into<String>,
    ) -> LikedRecipe {
        let like = LikedRecipe {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            img: img.into(),
        };
        self.likes.insert(like.id.clone(), like.clone());
        like
    }

    pub fn delete_like(&mut self, id: &str) -> Option<LikedRecipe> {
        self.likes.shift_remove(id)
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.likes.contains_key(id)
    }

    pub fn count(&self) -> usize {
        self.likes.len()
    }

    pub fn get(&self, id: &str) -> Option<&LikedRecipe> {
        self.likes.get(id)
    }

    /// Liked recipes in the order they were liked
    pub fn likes(&self) -> impl Iterator<Item = &LikedRecipe> {
        self.likes.values()
    }

    /// Write the whole collection to the store
    ///
    /// A failure leaves the in-memory collection as it is.
    pub async fn persist(&self) -> Result<()> {
        let records: Vec<&LikedRecipe> = self.likes.values().collect();
        let value = serde_json::to_value(records)?;

        self.store
            .set(LIKES_KEY, value)
            .await
            .map_err(|err| ForkifyError::PersistenceUnavailable(err.to_string()))?;

        debug!("Persisted {} likes", self.likes.len());
        Ok(())
    }

    /// Replace the collection with what the store holds
    ///
    /// Never fails: a missing, unreadable or malformed stored value yields an
    /// empty collection. Returns the number of likes restored.
    pub async fn restore(&mut self) -> usize {
        self.likes = match self.read_stored().await {
            Ok(records) => records.into_iter().map(|like| (like.id.clone(), like)).collect(),
            Err(err) => {
                warn!("Could not restore likes, starting empty: {}", err);
                IndexMap::new()
            }
        };

        debug!("Restored {} likes", self.likes.len());
        self.likes.len()
    }

    async fn read_stored(&self) -> Result<Vec<LikedRecipe>> {
        let stored = self
            .store
            .get(LIKES_KEY)
            .await
            .map_err(|err| ForkifyError::PersistenceUnavailable(err.to_string()))?;

        match stored {
            Some(value) if !value.is_null() => Ok(serde_json::from_value(value)?),
            _ => Ok(Vec::new()),
        }
    }
}

impl std::fmt::Debug for Likes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Likes")
            .field("likes", &self.likes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_fixtures::{BrokenStore, memory_store, sqlite_store};
    use crate::storage::{MemoryStore, SqliteStore};
    use rstest::*;
    use serde_json::json;

    fn like_pizza(likes: &mut Likes) -> LikedRecipe {
        likes.add_like("47746", "Best Pizza Dough Ever", "101 Cookbooks", "dough.jpg")
    }

    #[rstest]
    fn test_is_liked_follows_add_and_delete(memory_store: Arc<MemoryStore>) {
        let mut likes = Likes::new(memory_store);

        assert!(!likes.is_liked("47746"));
        like_pizza(&mut likes);
        assert!(likes.is_liked("47746"));
        assert_eq!(likes.count(), 1);

        likes.delete_like("47746");
        assert!(!likes.is_liked("47746"));
        assert_eq!(likes.count(), 0);
    }

    #[rstest]
    fn test_add_like_for_same_id_overwrites(memory_store: Arc<MemoryStore>) {
        let mut likes = Likes::new(memory_store);

        like_pizza(&mut likes);
        let updated = likes.add_like("47746", "Pizza Dough v2", "101 Cookbooks", "dough.jpg");

        assert_eq!(likes.count(), 1);
        assert_eq!(likes.get("47746"), Some(&updated));
    }

    #[rstest]
    fn test_delete_unknown_like_is_noop(memory_store: Arc<MemoryStore>) {
        let mut likes = Likes::new(memory_store);
        like_pizza(&mut likes);

        assert_eq!(likes.delete_like("nope"), None);
        assert_eq!(likes.count(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn test_persist_then_restore_in_fresh_model(memory_store: Arc<MemoryStore>) {
        let mut likes = Likes::new(memory_store.clone());
        like_pizza(&mut likes);
        likes.add_like("35382", "Grilled Cheese", "Closet Cooking", "cheese.jpg");
        likes.persist().await.expect("Failed to persist");

        let mut fresh = Likes::new(memory_store);
        let restored = fresh.restore().await;

        assert_eq!(restored, 2);
        let original: Vec<&LikedRecipe> = likes.likes().collect();
        let reloaded: Vec<&LikedRecipe> = fresh.likes().collect();
        assert_eq!(original, reloaded);
    }

    #[rstest]
    #[tokio::test]
    async fn test_persist_then_restore_through_sqlite(#[future] sqlite_store: Arc<SqliteStore>) {
        let store = sqlite_store.await;
        let mut likes = Likes::new(store.clone());
        like_pizza(&mut likes);
        likes.persist().await.expect("Failed to persist");

        let mut fresh = Likes::new(store);
        fresh.restore().await;

        assert!(fresh.is_liked("47746"));
        assert_eq!(fresh.get("47746").map(|l| l.author.as_str()), Some("101 Cookbooks"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_restore_with_nothing_stored_is_empty(memory_store: Arc<MemoryStore>) {
        let mut likes = Likes::new(memory_store);

        assert_eq!(likes.restore().await, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn test_restore_replaces_in_memory_state(memory_store: Arc<MemoryStore>) {
        let mut likes = Likes::new(memory_store);
        like_pizza(&mut likes);

        likes.restore().await;

        assert!(!likes.is_liked("47746"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_restore_malformed_value_is_empty(memory_store: Arc<MemoryStore>) {
        memory_store
            .set(LIKES_KEY, json!({"unexpected": "shape"}))
            .await
            .expect("set");
        let mut likes = Likes::new(memory_store);

        assert_eq!(likes.restore().await, 0);
    }

    #[tokio::test]
    async fn test_restore_with_broken_store_is_empty() {
        let mut likes = Likes::new(Arc::new(BrokenStore));

        assert_eq!(likes.restore().await, 0);
    }

    #[tokio::test]
    async fn test_persist_failure_is_surfaced_and_keeps_memory() {
        let mut likes = Likes::new(Arc::new(BrokenStore));
        like_pizza(&mut likes);

        let result = likes.persist().await;

        assert!(matches!(result, Err(ForkifyError::PersistenceUnavailable(_))));
        assert!(likes.is_liked("47746"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_persisted_format_is_an_ordered_array(memory_store: Arc<MemoryStore>) {
        let mut likes = Likes::new(memory_store.clone());
        likes.add_like("b", "B", "x", "b.jpg");
        likes.add_like("a", "A", "y", "a.jpg");
        likes.persist().await.expect("persist");

        let stored = memory_store.get(LIKES_KEY).await.expect("get");

        assert_eq!(
            stored,
            Some(json!([
                {"id": "b", "title": "B", "author": "x", "img": "b.jpg"},
                {"id": "a", "title": "A", "author": "y", "img": "a.jpg"}
            ]))
        );
    }
}
