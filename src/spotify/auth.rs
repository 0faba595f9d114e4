use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, Url, header::AUTHORIZATION};

use crate::{config::Config, error::CollectError, types::Token};

/// Builds the authorization URL the browser is sent to, with the query
/// parameters percent-encoded. Redirect URIs and scopes contain characters
/// (`:`, `/`, spaces) that must not land in the query raw.
pub fn authorize_url(config: &Config, csrf_state: &str) -> Result<String, String> {
    let url = Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("scope", config.scope.as_str()),
            ("state", csrf_state),
        ],
    )
    .map_err(|e| format!("invalid authorization URL {}: {}", config.auth_url, e))?;
    Ok(url.into())
}

/// Exchanges a one-time authorization code for an access token.
///
/// Sends a form-encoded POST to the token endpoint with
/// `grant_type=authorization_code`, the code, and the redirect URI used
/// during authorization. Authentication is HTTP Basic with
/// `base64(client_id:client_secret)`.
///
/// The authorization code is single-use and short-lived, so failures are
/// never retried: a 4xx answer (invalid, expired or reused code, bad
/// credentials) maps to [`CollectError::AuthExchangeFailed`] carrying the
/// provider's error body, and network failures to
/// [`CollectError::Transport`].
pub async fn exchange_code(config: &Config, code: &str) -> Result<Token, CollectError> {
    let client = Client::new();
    let response = client
        .post(&config.token_url)
        .header(AUTHORIZATION, format!("Basic {}", basic_credentials(config)))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &config.redirect_uri),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(CollectError::AuthExchangeFailed {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.json::<Token>().await?)
}

fn basic_credentials(config: &Config) -> String {
    STANDARD.encode(format!("{}:{}", config.client_id, config.client_secret))
}
