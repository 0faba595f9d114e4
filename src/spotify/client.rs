use reqwest::{
    Client,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde::de::DeserializeOwned;

use crate::error::CollectError;

/// Generic request wrapper for the Spotify Web API.
///
/// Holds the API base URL and the bearer token for one collection run and
/// exposes a single typed GET. Endpoint-specific functions compose on top of
/// this instead of specializing it; the client itself never interprets
/// response bodies beyond JSON decoding.
pub struct ApiClient {
    base_url: String,
    access_token: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: access_token.into(),
            http: Client::new(),
        }
    }

    /// Joins the base URL and an endpoint path with exactly one slash.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Issues an authenticated GET against `endpoint` and decodes the JSON
    /// response body.
    ///
    /// Query values must already be stringified scalars; numeric parameters
    /// are formatted by the caller. A non-2xx status maps to
    /// [`CollectError::Api`] carrying the response body, network-level
    /// failures to [`CollectError::Transport`]. No retries.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, CollectError> {
        let response = self
            .http
            .get(self.endpoint_url(endpoint))
            .query(query)
            .header(AUTHORIZATION, format!("Bearer {}", self.access_token))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CollectError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<T>().await?)
    }
}
