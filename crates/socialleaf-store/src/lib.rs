//! Persisted local state shared between socialleaf processes and consumers.
//!
//! Two files live in the configured data directory:
//!
//! - `socialleaf_connections.json` — the platform connection registry. The
//!   file name and shape are a contract with the connect-account tooling;
//!   mutations publish a typed [`StoreEvent`] on an in-process broadcast bus
//!   so running aggregators re-sync without polling.
//! - `socialleaf_cached_data.json` — the snapshot cache envelope, valid for a
//!   fixed freshness window and discarded afterwards.

mod cache;
mod connections;
mod error;

pub use cache::{CacheEnvelope, SnapshotCache};
pub use connections::{ConnectionStore, StoreEvent};
pub use error::StoreError;
