use log::{debug, info};
use tokio::sync::Mutex;

use super::RequestOutcome;
use crate::error::{ForkifyError, Result};
use crate::models::{Recipe, ServingsDirection};
use crate::service::RecipeService;
use crate::state::AppState;

/// Load the recipe with `id` and make it the active recipe
///
/// The new recipe is fetched, its ingredients parsed and its prep time
/// estimated (unless the source reported one) before it replaces the active
/// recipe. Fetch failures are returned as-is and leave the active recipe alone.
pub async fn control_recipe(
    state: &Mutex<AppState>,
    service: &dyn RecipeService,
    id: &str,
) -> Result<RequestOutcome> {
    let id = id.trim();
    if id.is_empty() {
        return Ok(RequestOutcome::Ignored);
    }

    // Claim the recipe slot, then fetch without holding the lock
    let ticket = state.lock().await.begin_recipe_load();
    let mut recipe = Recipe::new(id);
    let loaded = recipe.load(service).await;

    // Drop the response if a newer load was started meanwhile
    let mut state = state.lock().await;
    if !state.is_current(ticket) {
        debug!("Dropping stale load of recipe {}", id);
        return Ok(RequestOutcome::Superseded);
    }
    loaded?;

    // Parse ingredients and fill in prep time
    recipe.derive_ingredients();
    if recipe.prep_time_minutes().is_none() {
        recipe.estimate_prep_time();
    }

    info!(
        "Loaded recipe {} ({} ingredients, {} servings)",
        recipe.id(),
        recipe.ingredients().len(),
        recipe.servings()
    );
    // Replace the active recipe
    state.recipe = Some(recipe);
    Ok(RequestOutcome::Applied)
}

/// Step the active recipe's servings; returns whether anything changed
pub async fn control_servings(state: &Mutex<AppState>, direction: ServingsDirection) -> Result<bool> {
    let mut state = state.lock().await;
    let recipe = state.recipe.as_mut().ok_or(ForkifyError::NoActiveRecipe)?;
    Ok(recipe.rescale_servings(direction))
}
