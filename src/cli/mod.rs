//! # CLI Module
//!
//! User-facing commands:
//!
//! - [`run`] - serves the OAuth callback endpoints, opens the login URL in
//!   the browser, and waits for the resulting collection run to finish
//! - [`show`] - prints the most recent result artifact as a table
//!
//! Commands print their own feedback through the crate's logging macros and
//! terminate the process on unrecoverable errors.

mod run;
mod show;

pub use run::run;
pub use show::show;
