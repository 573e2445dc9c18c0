use tokio::sync::Mutex;

use crate::error::{ForkifyError, Result};
use crate::models::ShoppingListItem;
use crate::state::AppState;

/// Copy every ingredient of the active recipe into the shopping list
///
/// Quantities are taken as currently scaled. Lines with no name (blank
/// source lines) are skipped. Returns the new items in recipe order.
pub async fn control_list(state: &Mutex<AppState>) -> Result<Vec<ShoppingListItem>> {
    let mut state = state.lock().await;
    let AppState { recipe, list, .. } = &mut *state;
    let recipe = recipe.as_ref().ok_or(ForkifyError::NoActiveRecipe)?;

    // One item per named ingredient, in recipe order
    let added = recipe
        .ingredients()
        .iter()
        .filter(|line| !line.is_degenerate())
        .map(|line| list.add_item(line.quantity, line.unit_str(), line.name.clone()))
        .collect();

    Ok(added)
}

pub async fn delete_list_item(state: &Mutex<AppState>, id: &str) -> Option<ShoppingListItem> {
    state.lock().await.list.delete_item(id)
}

pub async fn update_list_count(
    state: &Mutex<AppState>,
    id: &str,
    count: Option<f64>,
) -> Result<ShoppingListItem> {
    let mut state = state.lock().await;
    state.list.update_count(id, count).cloned()
}
