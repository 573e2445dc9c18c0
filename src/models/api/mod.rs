mod recipe;

pub(crate) use recipe::{DetailResponse, SearchResponse};
pub use recipe::{RecipeDetail, RecipeSummary};
