use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForkifyError {
    #[error("Failed to fetch recipe data: {0}")]
    FetchFailed(String),

    #[error("Search for '{query}' failed: {reason}")]
    SearchFailed { query: String, reason: String },

    #[error("Malformed recipe record: {0}")]
    MalformedRecord(String),

    #[error("Shopping list item not found with id: {0}")]
    NotFound(String),

    #[error("Persistence unavailable: {0}")]
    PersistenceUnavailable(String),

    #[error("No recipe is currently loaded")]
    NoActiveRecipe,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl From<reqwest::Error> for ForkifyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ForkifyError::FetchFailed(format!("request timed out: {}", err))
        } else {
            ForkifyError::FetchFailed(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ForkifyError>;
