//! Application state engine for a recipe lookup and meal-planning client.
//!
//! Holds the search results, the active recipe, the shopping list and the
//! liked-recipes collection, and implements ingredient parsing and servings
//! rescaling. Rendering and event wiring live elsewhere; they drive this
//! crate through [`controllers`].

pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod service;
pub mod state;
pub mod storage;

pub use config::ForkifyConfig;
pub use error::{ForkifyError, Result};
pub use service::{HttpRecipeService, RecipeService};
pub use state::AppState;
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
