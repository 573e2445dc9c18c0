use tokio::sync::Mutex;

use crate::error::{ForkifyError, Result};
use crate::state::AppState;

/// Result of toggling the like on the active recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeToggle {
    /// Whether the recipe is liked after the toggle
    pub liked: bool,
    /// Total liked recipes after the toggle
    pub count: usize,
}

/// Like the active recipe if it isn't liked yet, unlike it otherwise, then persist
///
/// If persisting fails the in-memory toggle still stands and the error is
/// returned as `PersistenceUnavailable`.
pub async fn control_like(state: &Mutex<AppState>) -> Result<LikeToggle> {
    let mut state = state.lock().await;
    let AppState { recipe, likes, .. } = &mut *state;
    let recipe = recipe.as_ref().ok_or(ForkifyError::NoActiveRecipe)?;

    // Toggle in memory first; a persist failure keeps the toggle
    let liked = if likes.is_liked(recipe.id()) {
        likes.delete_like(recipe.id());
        false
    } else {
        likes.add_like(recipe.id(), recipe.title(), recipe.author(), recipe.img());
        true
    };

    likes.persist().await?;

    Ok(LikeToggle {
        liked,
        count: likes.count(),
    })
}

/// Load persisted likes into the state at startup; returns how many were found
pub async fn restore_likes(state: &Mutex<AppState>) -> usize {
    state.lock().await.likes.restore().await
}
