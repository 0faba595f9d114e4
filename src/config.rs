//! Configuration for the play history collector.
//!
//! Configuration is read from environment variables, optionally seeded from a
//! `.env` file in the platform's local data directory (`splaycli/.env`). All
//! values are resolved once at startup into an explicit [`Config`] struct;
//! a missing required variable fails fast with a clear error instead of
//! panicking somewhere deep in a request.

use std::{env, path::PathBuf};

use dotenv;

const DEFAULT_SCOPE: &str = "user-read-recently-played";

/// Resolved application configuration, built once via [`Config::from_env`]
/// and passed explicitly to everything that needs it.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub server_addr: String,
    pub output_dir: PathBuf,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// Required variables: `SPOTIFY_API_AUTH_CLIENT_ID`,
    /// `SPOTIFY_API_AUTH_CLIENT_SECRET`, `SPOTIFY_API_REDIRECT_URI`,
    /// `SPOTIFY_API_AUTH_URL`, `SPOTIFY_API_TOKEN_URL`, `SPOTIFY_API_URL`
    /// and `SERVER_ADDRESS`. `SPOTIFY_API_AUTH_SCOPE` defaults to
    /// `user-read-recently-played` and `SPLAYCLI_OUTPUT_DIR` to
    /// `<data dir>/splaycli/out`.
    pub fn from_env() -> Result<Self, String> {
        Ok(Config {
            client_id: require("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: require("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            redirect_uri: require("SPOTIFY_API_REDIRECT_URI")?,
            scope: env::var("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|_| DEFAULT_SCOPE.to_string()),
            auth_url: require("SPOTIFY_API_AUTH_URL")?,
            token_url: require("SPOTIFY_API_TOKEN_URL")?,
            api_url: require("SPOTIFY_API_URL")?,
            server_addr: require("SERVER_ADDRESS")?,
            output_dir: env::var("SPLAYCLI_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_output_dir()),
        })
    }
}

fn require(name: &str) -> Result<String, String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(format!("{} must be set", name)),
    }
}

/// Default location for result artifacts.
///
/// - Linux: `~/.local/share/splaycli/out`
/// - macOS: `~/Library/Application Support/splaycli/out`
/// - Windows: `%LOCALAPPDATA%/splaycli/out`
pub fn default_output_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("splaycli/out");
    path
}

/// Loads environment variables from `splaycli/.env` in the local data
/// directory, creating the directory if needed. A missing `.env` file is not
/// an error; the variables may come from the environment directly.
pub async fn load_env() -> crate::Res<()> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("splaycli/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)?;
    }
    Ok(())
}
