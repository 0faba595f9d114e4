use std::fmt;

/// Errors that can occur during a collection run.
///
/// Every failure of the token exchange, the paged fetch loop, or the result
/// sink maps onto one of these variants. None of them are retried: the
/// authorization code is single-use, and the run simply aborts and reports.
#[derive(Debug)]
pub enum CollectError {
    /// The token endpoint rejected the authorization code or credentials.
    /// Carries the provider's error body for diagnosis.
    AuthExchangeFailed { status: u16, body: String },
    /// Network-level failure (DNS, connect, timeout, malformed body) at any
    /// HTTP call.
    Transport(reqwest::Error),
    /// The Web API answered with a non-2xx status during pagination.
    Api { status: u16, body: String },
    /// Writing the result artifact failed.
    Persistence(std::io::Error),
}

impl fmt::Display for CollectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectError::AuthExchangeFailed { status, body } => {
                write!(f, "token exchange failed with status {}: {}", status, body)
            }
            CollectError::Transport(err) => write!(f, "transport error: {}", err),
            CollectError::Api { status, body } => {
                write!(f, "API request failed with status {}: {}", status, body)
            }
            CollectError::Persistence(err) => write!(f, "failed to persist results: {}", err),
        }
    }
}

impl std::error::Error for CollectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollectError::Transport(err) => Some(err),
            CollectError::Persistence(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CollectError {
    fn from(err: reqwest::Error) -> Self {
        CollectError::Transport(err)
    }
}

impl From<std::io::Error> for CollectError {
    fn from(err: std::io::Error) -> Self {
        CollectError::Persistence(err)
    }
}
