use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rstest::*;
use serde_json::Value;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use tokio::sync::oneshot;

use crate::error::{ForkifyError, Result};
use crate::models::api::{RecipeDetail, RecipeSummary};
use crate::service::RecipeService;
use crate::storage::{KeyValueStore, MemoryStore, SqliteStore};

/// Test fixture that creates an in-memory SQLite database with migrations applied
#[fixture]
pub async fn test_db() -> SqlitePool {
    let _ = env_logger::builder().is_test(true).try_init();

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

#[fixture]
pub async fn sqlite_store(#[future] test_db: SqlitePool) -> Arc<SqliteStore> {
    Arc::new(
        SqliteStore::from_pool(test_db.await)
            .await
            .expect("Failed to open SQLite store"),
    )
}

#[fixture]
pub fn memory_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

#[fixture]
pub fn pancake_detail() -> RecipeDetail {
    RecipeDetail {
        id: "pancakes-1".to_string(),
        title: "Fluffy Pancakes".to_string(),
        author: "Weekend Kitchen".to_string(),
        img: "pancakes.jpg".to_string(),
        source_url: Some("http://example.com/pancakes".to_string()),
        ingredient_lines: vec![
            "2 cups flour".to_string(),
            "1 1/2 cups milk (whole)".to_string(),
            "2 eggs".to_string(),
            "Salt to taste".to_string(),
        ],
        servings: Some(4),
        prep_time_minutes: None,
    }
}

/// `count` summaries with ids `recipe-1` .. `recipe-{count}`
pub fn summaries(count: usize) -> Vec<RecipeSummary> {
    (1..=count)
        .map(|n| RecipeSummary {
            id: format!("recipe-{}", n),
            title: format!("Recipe {}", n),
            author: "Test Kitchen".to_string(),
            img: format!("{}.jpg", n),
            source_url: None,
        })
        .collect()
}

/// In-process stand-in for the remote recipe index
#[derive(Debug, Default)]
pub struct FakeRecipeService {
    summaries: Vec<RecipeSummary>,
    recipes: HashMap<String, RecipeDetail>,
    failing: bool,
}

impl FakeRecipeService {
    pub fn with_summaries(summaries: Vec<RecipeSummary>) -> Self {
        Self {
            summaries,
            ..Self::default()
        }
    }

    pub fn with_recipe(detail: RecipeDetail) -> Self {
        let mut service = Self::default();
        service.recipes.insert(detail.id.clone(), detail);
        service
    }

    /// Every call fails the way an unreachable server would
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl RecipeService for FakeRecipeService {
    async fn search(&self, _query: &str) -> Result<Vec<RecipeSummary>> {
        if self.failing {
            return Err(ForkifyError::FetchFailed("connection refused".to_string()));
        }
        Ok(self.summaries.clone())
    }

    async fn get_recipe(&self, id: &str) -> Result<RecipeDetail> {
        if self.failing {
            return Err(ForkifyError::FetchFailed("connection refused".to_string()));
        }
        self.recipes
            .get(id)
            .cloned()
            .ok_or_else(|| ForkifyError::FetchFailed(format!("HTTP 404 for recipe {}", id)))
    }
}

/// Store whose every operation fails
pub struct BrokenStore;

#[async_trait]
impl KeyValueStore for BrokenStore {
    async fn get(&self, _key: &str) -> Result<Option<Value>> {
        Err(ForkifyError::PersistenceUnavailable("disk on fire".to_string()))
    }

    async fn set(&self, _key: &str, _value: Value) -> Result<()> {
        Err(ForkifyError::PersistenceUnavailable("disk on fire".to_string()))
    }
}

/// Response a [`Gate`] releases into a waiting call
#[derive(Debug)]
pub enum GatedResponse {
    Search(Vec<RecipeSummary>),
    Recipe(RecipeDetail),
    Fail,
}

/// Releases exactly one pending call on a [`GatedRecipeService`]
pub struct Gate {
    sender: oneshot::Sender<GatedResponse>,
}

impl Gate {
    pub fn release_search(self, summaries: Vec<RecipeSummary>) {
        let _ = self.sender.send(GatedResponse::Search(summaries));
    }

    pub fn release_recipe(self, detail: RecipeDetail) {
        let _ = self.sender.send(GatedResponse::Recipe(detail));
    }

    pub fn fail(self) {
        let _ = self.sender.send(GatedResponse::Fail);
    }
}

/// Recipe service whose calls block until the test releases them, keyed by
/// query (for searches) or id (for recipes)
#[derive(Default)]
pub struct GatedRecipeService {
    gates: Mutex<HashMap<String, oneshot::Receiver<GatedResponse>>>,
    called: Mutex<HashSet<String>>,
}

impl GatedRecipeService {
    pub fn gate(&self, key: &str) -> Gate {
        let (sender, receiver) = oneshot::channel();
        self.gates
            .lock()
            .expect("gates lock")
            .insert(key.to_string(), receiver);
        Gate { sender }
    }

    /// Yield until a call for `key` has reached the service
    pub async fn wait_until_called(&self, key: &str) {
        while !self.called.lock().expect("called lock").contains(key) {
            tokio::task::yield_now().await;
        }
    }

    async fn wait(&self, key: &str) -> GatedResponse {
        let receiver = self.gates.lock().expect("gates lock").remove(key);
        self.called
            .lock()
            .expect("called lock")
            .insert(key.to_string());

        match receiver {
            Some(receiver) => receiver.await.unwrap_or(GatedResponse::Fail),
            None => GatedResponse::Fail,
        }
    }
}

#[async_trait]
impl RecipeService for GatedRecipeService {
    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>> {
        match self.wait(query).await {
            GatedResponse::Search(summaries) => Ok(summaries),
            other => Err(ForkifyError::FetchFailed(format!("gate released {:?}", other))),
        }
    }

    async fn get_recipe(&self, id: &str) -> Result<RecipeDetail> {
        match self.wait(id).await {
            GatedResponse::Recipe(detail) => Ok(detail),
            other => Err(ForkifyError::FetchFailed(format!("gate released {:?}", other))),
        }
    }
}
