//! Per-platform snapshot shapes as served by the upstream backend.
//!
//! Snapshots are replaced wholesale on every fetch; nothing merges
//! field-by-field. Every nested statistic is optional with a zero default so
//! an unexpected response degrades to empty data instead of a parse failure.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelStatistics {
    #[serde(default)]
    pub subscribers: u64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub videos: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YoutubeChannel {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(
        default,
        rename = "customUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ChannelStatistics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoStatistics {
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YoutubeVideo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<VideoStatistics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// One YouTube fetch result: channel stats plus its recent uploads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YoutubeSnapshot {
    pub channel: YoutubeChannel,
    #[serde(default)]
    pub recent_videos: Vec<YoutubeVideo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstagramProfile {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub posts: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstagramAccount {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstagramMetrics {
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub posts: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reach: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub following: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstagramAnalyticsDay {
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub engagement: u64,
    #[serde(default)]
    pub reach: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstagramMedia {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub media_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// One Instagram fetch result. Shallow (public/simulated) responses carry only
/// `profile`/`account`; credentialed responses add `metrics` and `analytics`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstagramSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<InstagramProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<InstagramAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<InstagramMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics: Option<Vec<InstagramAnalyticsDay>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_media: Option<Vec<InstagramMedia>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_simulated: Option<bool>,
}

/// A snapshot from any platform with a first-party integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformSnapshot {
    Youtube(YoutubeSnapshot),
    Instagram(InstagramSnapshot),
}
