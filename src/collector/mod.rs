//! # Collector Module
//!
//! The core of a collection run: the backward pagination loop over the
//! recently-played endpoint ([`collect`]), the job registry that makes a
//! run's outcome observable and rejects duplicate runs ([`JobRegistry`]),
//! and the sink that persists the accumulated items ([`ResultSink`]).
//!
//! A run is strictly sequential: each page's cursor depends on the previous
//! response, so exactly one request is in flight at a time.

mod job;
mod run;
mod sink;

pub use job::{JobRegistry, JobStatus, RunReport};
pub use run::{Collection, CollectionOutcome, HistorySource, collect, run};
pub use sink::ResultSink;
