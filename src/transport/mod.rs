mod http;

pub use self::http::HttpTransport;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::model::{RawRecipe, RecipeSummary};

/// Access to the remote recipe catalog
#[async_trait]
pub trait RecipeTransport: Send + Sync {
    /// Search the catalog. An empty result is not an error.
    async fn search_recipes(&self, query: &str) -> Result<Vec<RecipeSummary>, TransportError>;

    /// Fetch one recipe with its raw ingredient lines
    async fn fetch_recipe(&self, id: &str) -> Result<RawRecipe, TransportError>;
}
