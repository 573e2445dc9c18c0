//! Glue between UI intents and the models held in [`AppState`]
//!
//! Remote service calls run with the shared state unlocked, so a slow
//! response cannot block other intents. Likes are the exception on the
//! storage side: `control_like` and `restore_likes` keep the lock while the
//! [`KeyValueStore`] is read or written, so a toggle and its persisted copy
//! never interleave with another toggle.
//!
//! [`AppState`]: crate::state::AppState
//! [`KeyValueStore`]: crate::storage::KeyValueStore

mod likes_controller;
mod list_controller;
mod recipe_controller;
mod search_controller;

pub use likes_controller::{LikeToggle, control_like, restore_likes};
pub use list_controller::{control_list, delete_list_item, update_list_count};
pub use recipe_controller::{control_recipe, control_servings};
pub use search_controller::control_search;

/// What happened to a request once its response arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The response was written into the state
    Applied,
    /// A newer request of the same kind was issued meanwhile; the response was dropped
    Superseded,
    /// Nothing to do (blank query or id)
    Ignored,
}
