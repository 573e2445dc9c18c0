use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};

use crate::config::ApiConfig;
use crate::error::{ForkifyError, Result};
use crate::models::api::{DetailResponse, RecipeDetail, RecipeSummary, SearchResponse};

/// The remote recipe index
#[async_trait]
pub trait RecipeService: Send + Sync {
    /// Find recipes matching a free-text query
    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>>;

    /// Fetch the full record for one recipe
    async fn get_recipe(&self, id: &str) -> Result<RecipeDetail>;
}

/// [`RecipeService`] over the food2fork-style HTTP API
pub struct HttpRecipeService {
    client: Client,
    base_url: String,
    key: Option<String>,
}

impl HttpRecipeService {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("forkify/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            key: config.key.clone(),
        })
    }

    async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Response> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {} {:?}", url, params);

        let mut request = self.client.get(&url).query(params);
        if let Some(key) = &self.key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = request.send().await?.error_for_status()?;
        Ok(response)
    }
}

#[async_trait]
impl RecipeService for HttpRecipeService {
    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>> {
        let body: SearchResponse = self.get("search", &[("q", query)]).await?.json().await?;
        let summaries = body.into_summaries();
        debug!("Search for {:?} returned {} recipes", query, summaries.len());
        Ok(summaries)
    }

    async fn get_recipe(&self, id: &str) -> Result<RecipeDetail> {
        let body: DetailResponse = self.get("get", &[("rId", id)]).await?.json().await?;
        body.into_detail().map_err(|err| match err {
            ForkifyError::MalformedRecord(reason) => {
                ForkifyError::FetchFailed(format!("recipe {}: {}", id, reason))
            }
            other => other,
        })
    }
}
