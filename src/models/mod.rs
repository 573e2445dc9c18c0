mod likes;
mod recipe;
mod search;
mod shopping_list;

pub mod api;
pub mod ingredient;
pub mod units;

#[cfg(test)]
pub mod test_fixtures;

pub use ingredient::IngredientLine;
pub use likes::{LIKES_KEY, LikedRecipe, Likes};
pub use recipe::{DEFAULT_SERVINGS, Recipe, ServingsDirection};
pub use search::{RESULTS_PER_PAGE, Search};
pub use shopping_list::{IdGenerator, RandomIds, SequentialIds, ShoppingList, ShoppingListItem};
pub use units::CanonicalUnit;
