use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ForkifyError, Result};

/// One entry in a search result list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
    pub source_url: Option<String>,
}

/// Everything the detail endpoint reports about one recipe
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDetail {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
    pub source_url: Option<String>,
    pub ingredient_lines: Vec<String>,
    /// `None` when the source omits servings or reports something below 1
    pub servings: Option<u32>,
    pub prep_time_minutes: Option<u32>,
}

/// Body of `GET /search`
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub recipes: Vec<Value>,
}

/// Body of `GET /get`
#[derive(Debug, Deserialize)]
pub(crate) struct DetailResponse {
    pub recipe: Value,
}

/// Loosely-typed recipe record as the remote service sends it
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireRecipe {
    recipe_id: Option<Value>,
    title: Option<String>,
    publisher: Option<String>,
    image_url: Option<String>,
    source_url: Option<String>,
    ingredients: Option<Vec<Value>>,
    servings: Option<Value>,
    cooking_time: Option<Value>,
}

impl SearchResponse {
    /// Validate each summary, dropping entries that carry no usable id
    pub fn into_summaries(self) -> Vec<RecipeSummary> {
        self.recipes
            .into_iter()
            .filter_map(|raw| match summary_from_value(raw) {
                Ok(summary) => Some(summary),
                Err(err) => {
                    debug!("Dropping search result: {}", err);
                    None
                }
            })
            .collect()
    }
}

impl DetailResponse {
    pub fn into_detail(self) -> Result<RecipeDetail> {
        let wire = wire_from_value(self.recipe)?;
        let id = wire_id(&wire)?;

        let ingredient_lines = wire
            .ingredients
            .unwrap_or_default()
            .into_iter()
            .filter_map(|line| match line {
                Value::String(text) => Some(text),
                other => {
                    debug!("Dropping non-text ingredient entry {} for recipe {}", other, id);
                    None
                }
            })
            .collect();

        Ok(RecipeDetail {
            id,
            title: wire.title.unwrap_or_default(),
            author: wire.publisher.unwrap_or_default(),
            img: wire.image_url.unwrap_or_default(),
            source_url: wire.source_url,
            ingredient_lines,
            servings: wire.servings.as_ref().and_then(positive_count),
            prep_time_minutes: wire.cooking_time.as_ref().and_then(positive_count),
        })
    }
}

fn summary_from_value(raw: Value) -> Result<RecipeSummary> {
    let wire = wire_from_value(raw)?;
    let id = wire_id(&wire)?;

    Ok(RecipeSummary {
        id,
        title: wire.title.unwrap_or_default(),
        author: wire.publisher.unwrap_or_default(),
        img: wire.image_url.unwrap_or_default(),
        source_url: wire.source_url,
    })
}

fn wire_from_value(raw: Value) -> Result<WireRecipe> {
    serde_json::from_value(raw).map_err(|err| ForkifyError::MalformedRecord(err.to_string()))
}

/// Ids arrive as strings from some deployments and as numbers from others
fn wire_id(wire: &WireRecipe) -> Result<String> {
    match &wire.recipe_id {
        Some(Value::String(id)) if !id.trim().is_empty() => Ok(id.trim().to_string()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(ForkifyError::MalformedRecord(
            "record has no recipe_id".to_string(),
        )),
    }
}

fn positive_count(value: &Value) -> Option<u32> {
    let count = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if count.is_finite() && count >= 1.0 && count <= u32::MAX as f64 {
        Some(count.round() as u32)
    } else {
        None
    }
}
