//! Remapping for the backend's legacy handle-scoped YouTube shape.
//!
//! `/api/real/youtube?handle=...` answers with a flat
//! `{ account, metrics, recent_videos }` envelope instead of the canonical
//! `{ channel, recent_videos }` snapshot. The fields map one-to-one.

use serde::Deserialize;
use socialleaf_core::snapshot::{
    ChannelStatistics, YoutubeChannel, YoutubeSnapshot, YoutubeVideo,
};

#[derive(Debug, Deserialize)]
pub(crate) struct LegacyYoutubeEnvelope {
    pub account: LegacyAccount,
    #[serde(default)]
    pub metrics: Option<LegacyMetrics>,
    #[serde(default)]
    pub recent_videos: Vec<YoutubeVideo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LegacyAccount {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LegacyMetrics {
    #[serde(default)]
    pub subscribers: u64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub videos: u64,
}

impl From<LegacyYoutubeEnvelope> for YoutubeSnapshot {
    fn from(envelope: LegacyYoutubeEnvelope) -> Self {
        let metrics = envelope.metrics.unwrap_or_default();
        YoutubeSnapshot {
            channel: YoutubeChannel {
                id: envelope.account.id,
                title: envelope.account.name,
                custom_url: envelope.account.username,
                thumbnail: envelope.account.profile_picture,
                statistics: Some(ChannelStatistics {
                    subscribers: metrics.subscribers,
                    views: metrics.views,
                    videos: metrics.videos,
                }),
            },
            recent_videos: envelope.recent_videos,
        }
    }
}
