use log::warn;

use crate::error::{ForkifyError, Result};
use crate::models::api::RecipeSummary;
use crate::service::RecipeService;

/// Results shown per page of search results
pub const RESULTS_PER_PAGE: usize = 10;

/// The latest query and the recipes it returned
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Search {
    query: String,
    recipes: Vec<RecipeSummary>,
}

impl Search {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `query` against the remote index
    ///
    /// On success the stored query and results are replaced wholesale. On
    /// failure nothing is touched and the error is returned as `SearchFailed`.
    pub async fn search(&mut self, service: &dyn RecipeService, query: &str) -> Result<()> {
        let recipes = service
            .search(query)
            .await
            .map_err(|err| Search::failed(query, err))?;

        self.replace_results(query, recipes);
        Ok(())
    }

    /// Wrap a service error for `query` as `SearchFailed`
    pub fn failed(query: &str, err: ForkifyError) -> ForkifyError {
        warn!("Search for {:?} failed: {}", query, err);
        ForkifyError::SearchFailed {
            query: query.to_string(),
            reason: err.to_string(),
        }
    }

    /// Install a completed result set, discarding whatever was held before
    pub fn replace_results(&mut self, query: &str, recipes: Vec<RecipeSummary>) {
        self.query = query.to_string();
        self.recipes = recipes;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn recipes(&self) -> &[RecipeSummary] {
        &self.recipes
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// One page of results, 1-based; pages past the end are empty
    pub fn page(&self, page: usize) -> &[RecipeSummary] {
        let Some(start) = page.checked_sub(1).and_then(|p| p.checked_mul(RESULTS_PER_PAGE)) else {
            return &[];
        };
        if start >= self.recipes.len() {
            return &[];
        }

        let end = (start + RESULTS_PER_PAGE).min(self.recipes.len());
        &self.recipes[start..end]
    }

    pub fn page_count(&self) -> usize {
        self.recipes.len().div_ceil(RESULTS_PER_PAGE)
    }
}
