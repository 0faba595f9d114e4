//! # API Module
//!
//! HTTP endpoints for the local OAuth server:
//!
//! - [`login`] - redirects the browser to the provider's authorize URL,
//!   issuing a random CSRF `state` parameter for the round trip
//! - [`callback`] - receives the authorization redirect, verifies the state,
//!   and starts exactly one collection run per authorization
//! - [`status`] - exposes the collection job's observable state for polling
//! - [`health`] - status and version information
//!
//! All handlers are plain async functions wired into an axum router by
//! [`crate::server::start_api_server`], with shared state injected via
//! `Extension`.

mod callback;
mod health;
mod login;
mod status;

pub use callback::callback;
pub use health::health;
pub use login::login;
pub use status::status;
