//! Weekly engagement trend derivation.
//!
//! Each of the seven day labels takes the i-th entry of a platform's real
//! per-item series when one exists, and a stable synthesized value otherwise.
//! Twitter and LinkedIn have no per-item series and always synthesize.

use socialleaf_core::metrics::{TrendPoint, DAY_LABELS};
use socialleaf_core::snapshot::{InstagramSnapshot, YoutubeSnapshot};
use socialleaf_core::{stable_value, ConnectionMap, Platform};

/// Computes the 7-day engagement trend series.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_engagement_trends(
    youtube: Option<&YoutubeSnapshot>,
    instagram: Option<&InstagramSnapshot>,
    connections: &ConnectionMap,
) -> Vec<TrendPoint> {
    let yt_handle = youtube.map_or("default_yt", |snap| {
        non_empty(snap.channel.custom_url.as_deref())
            .or_else(|| non_empty(Some(snap.channel.id.as_str())))
            .unwrap_or("default_yt")
    });
    let ig_handle = instagram
        .and_then(|snap| snap.account.as_ref())
        .and_then(|account| non_empty(Some(account.username.as_str())))
        .unwrap_or("default_ig");

    let ig_analytics = instagram.and_then(|snap| snap.analytics.as_deref());

    DAY_LABELS
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let index = i64::try_from(i).unwrap_or_default();
            let mut point = TrendPoint {
                name: (*day).to_owned(),
                ..TrendPoint::default()
            };

            if let Some(snap) = youtube {
                point.youtube = Some(match snap.recent_videos.get(i) {
                    Some(video) => {
                        video.statistics.as_ref().map_or(0, |s| s.views) as f64 / 1_000.0
                    }
                    None => stable_value(yt_handle, index, 1_000.0, 3_000.0),
                });
            }

            if instagram.is_some() {
                point.instagram = Some(match ig_analytics.and_then(|a| a.get(i)) {
                    Some(day_row) => day_row.reach as f64 / 1_000.0,
                    None => stable_value(ig_handle, index, 800.0, 2_300.0),
                });
            }

            if connections.is_connected(Platform::Twitter) {
                let handle = connections.handle_or(Platform::Twitter, "tw");
                point.twitter = Some(stable_value(handle, index, 1_200.0, 2_500.0));
            }
            if connections.is_connected(Platform::Linkedin) {
                let handle = connections.handle_or(Platform::Linkedin, "li");
                point.linkedin = Some(stable_value(handle, index, 500.0, 1_500.0));
            }

            point
        })
        .collect()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
