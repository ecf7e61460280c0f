//! Typed HTTP client for the Social Leaf backend API.
//!
//! Wraps `reqwest` with endpoint-specific response handling: the featured
//! channel list, handle-scoped YouTube stats (including the legacy
//! `account`/`metrics` wire shape, which is remapped into the canonical
//! snapshot), and handle-scoped Instagram stats. A `{"connected": false}`
//! body is surfaced as [`ApiError::NotConnected`] so callers can treat it as
//! a no-update rather than a failure.

mod client;
mod error;
mod legacy;

pub use client::SocialApiClient;
pub use error::ApiError;
