use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::model::movie::Movie;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to catalog backend failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("catalog backend answered with status {0}")]
    Status(StatusCode),
}

/// Thin client for the catalog's REST surface. The base URL is injected so
/// callers (and tests) decide which backend it talks to.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_movies(&self) -> Result<Vec<Movie>, ApiError> {
        let url = format!("{}/movies", self.base_url);
        log::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    pub async fn create_movie(&self, payload: &Value) -> Result<Movie, ApiError> {
        let url = format!("{}/movies", self.base_url);
        log::debug!("POST {}", url);
        let response = self.client.post(&url).json(payload).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    pub async fn delete_movie(&self, movie_id: i64) -> Result<(), ApiError> {
        let url = format!("{}/movies/{}/", self.base_url, movie_id);
        log::debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_from_the_base_url() {
        let client = CatalogClient::new("http://localhost:8000/api/");
        assert_eq!(client.base_url(), "http://localhost:8000/api");
    }
}
