use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;

use super::RecipeTransport;
use crate::config::ApiConfig;
use crate::error::TransportError;
use crate::model::{RawRecipe, RecipeSummary};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    recipes: Vec<RecipeSummary>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RecipeResponse {
    #[serde(default)]
    recipe: Option<RawRecipe>,
    #[serde(default)]
    error: Option<String>,
}

/// Talks to a Forkify-style catalog over HTTP.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport from configuration
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        Self::with_base_url(
            config.base_url.clone(),
            Some(Duration::from_secs(config.timeout)),
        )
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (compatible; RecipeBrowser/0.1)")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Response, TransportError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        Ok(response)
    }
}

#[async_trait]
impl RecipeTransport for HttpTransport {
    async fn search_recipes(&self, query: &str) -> Result<Vec<RecipeSummary>, TransportError> {
        let body: SearchResponse = self.get("/api/search", &[("q", query)]).await?.json().await?;
        if let Some(error) = body.error {
            return Err(TransportError::Api(error));
        }
        debug!("Search for {:?} returned {} recipes", query, body.recipes.len());
        Ok(body.recipes)
    }

    async fn fetch_recipe(&self, id: &str) -> Result<RawRecipe, TransportError> {
        let body: RecipeResponse = self.get("/api/get", &[("rId", id)]).await?.json().await?;
        if let Some(error) = body.error {
            return Err(TransportError::Api(error));
        }
        body.recipe
            .ok_or_else(|| TransportError::Api(format!("response for recipe {} has no recipe", id)))
    }
}
