use log::debug;
use tokio::sync::Mutex;

use super::RequestOutcome;
use crate::error::Result;
use crate::models::Search;
use crate::service::RecipeService;
use crate::state::AppState;

/// Run a search and install its results as the current result set
///
/// A failure leaves the previous results in place. A response that arrives
/// after a newer search was started is dropped, failure or not.
pub async fn control_search(
    state: &Mutex<AppState>,
    service: &dyn RecipeService,
    query: &str,
) -> Result<RequestOutcome> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(RequestOutcome::Ignored);
    }

    // Claim the search slot, then fetch without holding the lock
    let ticket = state.lock().await.begin_search();
    let response = service.search(query).await;

    // Drop the response if a newer search was started meanwhile
    let mut state = state.lock().await;
    if !state.is_current(ticket) {
        debug!("Dropping stale results for search {:?}", query);
        return Ok(RequestOutcome::Superseded);
    }

    let recipes = response.map_err(|err| Search::failed(query, err))?;

    state
        .search
        .get_or_insert_with(Search::new)
        .replace_results(query, recipes);
    Ok(RequestOutcome::Applied)
}
