//! # Spotify Integration Module
//!
//! HTTP-level integration with the Spotify accounts service and Web API.
//! The module is deliberately thin: authentication and data retrieval are
//! plain functions over a small composed client rather than a type hierarchy.
//!
//! ## Submodules
//!
//! - [`auth`] - Exchanges a one-time authorization code for an access token
//!   using the client-secret Basic authorization grant. The code is
//!   single-use, so a failed exchange is never retried.
//! - [`client`] - [`client::ApiClient`], the generic request wrapper: base
//!   URL joining, bearer-token injection, query encoding, and uniform error
//!   mapping. Endpoint-agnostic; it never interprets response bodies.
//! - [`history`] - The recently-played endpoint on top of `ApiClient`,
//!   plus the [`crate::collector::HistorySource`] implementation driving the
//!   pagination loop.
//!
//! ## Error mapping
//!
//! All functions return [`crate::error::CollectError`]: network failures
//! surface as `Transport`, non-2xx answers as `Api { status, body }` (or
//! `AuthExchangeFailed` for the token endpoint). Rate-limit headers are not
//! interpreted and nothing is retried here.

pub mod auth;
pub mod client;
pub mod history;
