//! Platform identifiers and the persisted connection registry shape.
//!
//! `ConnectionMap` serializes to the same JSON written by every other consumer
//! of the `socialleaf_connections` entry, so field names are camelCase on the
//! wire.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A supported social platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
    Instagram,
    Twitter,
    Linkedin,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Youtube,
        Platform::Instagram,
        Platform::Twitter,
        Platform::Linkedin,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Instagram => "instagram",
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
        }
    }

    /// Whether a first-party data integration exists for this platform.
    ///
    /// Twitter and LinkedIn connections are registry-only: their dashboard
    /// contributions are always synthesized from the connection handle.
    #[must_use]
    pub fn has_first_party_api(self) -> bool {
        matches!(self, Platform::Youtube | Platform::Instagram)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "youtube" => Ok(Platform::Youtube),
            "instagram" => Ok(Platform::Instagram),
            "twitter" => Ok(Platform::Twitter),
            "linkedin" => Ok(Platform::Linkedin),
            other => Err(CoreError::UnknownPlatform(other.to_owned())),
        }
    }
}

/// Connection state for one platform, as written by the connect-account flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatus {
    #[serde(default)]
    pub connected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    /// Provenance label shown in the UI, e.g. `"Live"` or `"Simulated"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
}

/// The full platform → connection registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionMap(BTreeMap<Platform, ConnectionStatus>);

impl ConnectionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn status(&self, platform: Platform) -> Option<&ConnectionStatus> {
        self.0.get(&platform)
    }

    #[must_use]
    pub fn is_connected(&self, platform: Platform) -> bool {
        self.0.get(&platform).is_some_and(|s| s.connected)
    }

    /// The connection's public handle, or `default` when absent or empty.
    #[must_use]
    pub fn handle_or<'a>(&'a self, platform: Platform, default: &'a str) -> &'a str {
        self.0
            .get(&platform)
            .and_then(|s| s.public_handle.as_deref())
            .filter(|h| !h.is_empty())
            .unwrap_or(default)
    }

    pub fn set(&mut self, platform: Platform, status: ConnectionStatus) {
        self.0.insert(platform, status);
    }

    pub fn remove(&mut self, platform: Platform) -> Option<ConnectionStatus> {
        self.0.remove(&platform)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Platform, &ConnectionStatus)> {
        self.0.iter().map(|(p, s)| (*p, s))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
