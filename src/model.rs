use serde::{Deserialize, Serialize};

/// One entry of a catalog search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    #[serde(alias = "recipe_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub image_url: String,
}

/// A recipe exactly as the catalog returns it, before any parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecipe {
    #[serde(alias = "recipe_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub publisher_url: Option<String>,
    #[serde(default)]
    pub social_rank: Option<f64>,
}

/// Snapshot of a recipe taken at the moment it was liked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub image_url: String,
}

impl Like {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        publisher: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            publisher: publisher.into(),
            image_url: image_url.into(),
        }
    }
}
