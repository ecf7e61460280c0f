//! Cross-platform metric aggregation.
//!
//! A pure function of the current snapshots and connection registry, re-run
//! on every read. Platforms without a first-party integration contribute
//! stable synthesized values keyed off the connection handle, so the numbers
//! differ between accounts but never jitter between renders.

use socialleaf_core::metrics::UnifiedMetrics;
use socialleaf_core::snapshot::{InstagramSnapshot, YoutubeSnapshot};
use socialleaf_core::{stable_value, ConnectionMap, Platform};

/// Fallback card values shown when no platform contributes any impressions
/// and loading has finished. The dashboard never renders all-zero cards.
const PLACEHOLDER: UnifiedMetrics = UnifiedMetrics {
    total_impressions: 12_500_000,
    engagement_rate: 12.5,
    total_comments: 28_000,
    total_shares: 12_000,
    growth_rate: 15.2,
};

const GROWTH_RATE: f64 = 15.2;

/// Computes the unified dashboard totals.
///
/// Engagement rate is the simple mean of per-source rates (not
/// impression-weighted), rounded to two decimals.
#[must_use]
pub fn compute_unified_metrics(
    youtube: Option<&YoutubeSnapshot>,
    instagram: Option<&InstagramSnapshot>,
    connections: &ConnectionMap,
    loading: bool,
) -> UnifiedMetrics {
    let mut impressions: u64 = 0;
    let mut comments: u64 = 0;
    let mut shares: u64 = 0;
    let mut rate_sum = 0.0_f64;
    let mut sources: u32 = 0;

    if let Some(snap) = youtube {
        let videos = &snap.recent_videos;
        let v_views: u64 = videos.iter().filter_map(|v| v.statistics.as_ref()).map(|s| s.views).sum();
        let v_likes: u64 = videos.iter().filter_map(|v| v.statistics.as_ref()).map(|s| s.likes).sum();
        let v_comments: u64 = videos.iter().filter_map(|v| v.statistics.as_ref()).map(|s| s.comments).sum();
        let channel_views = snap.channel.statistics.as_ref().map_or(0, |s| s.views);

        impressions += if v_views > 0 { v_views } else { channel_views };
        comments += v_comments;
        // Likes stand in for shares; the API exposes no share count.
        shares += v_likes;

        if v_views > 0 {
            rate_sum += rate_percent(v_likes + v_comments, v_views);
            sources += 1;
        }
    }

    if let Some(ig) = instagram.and_then(|s| s.metrics.as_ref()) {
        impressions += ig.impressions;
        comments += non_zero(ig.comments_count).unwrap_or(ig.posts * 15);
        shares += non_zero(ig.like_count).unwrap_or(ig.posts * 8);

        if ig.impressions > 0 {
            #[allow(clippy::cast_precision_loss)]
            let reach = non_zero(ig.reach)
                .map_or_else(|| ig.impressions as f64 * 0.1, |r| r as f64);
            #[allow(clippy::cast_precision_loss)]
            let rate = reach / ig.impressions as f64 * 100.0;
            rate_sum += rate;
            sources += 1;
        }
    }

    if connections.is_connected(Platform::Twitter) {
        let handle = connections.handle_or(Platform::Twitter, "tw_user");
        impressions += rounded(stable_value(handle, 1, 250_000.0, 450_000.0));
        comments += rounded(stable_value(handle, 2, 4_000.0, 6_500.0));
        shares += rounded(stable_value(handle, 3, 1_500.0, 2_500.0));
        rate_sum += stable_value(handle, 4, 3.2, 4.8);
        sources += 1;
    }

    if connections.is_connected(Platform::Linkedin) {
        let handle = connections.handle_or(Platform::Linkedin, "li_user");
        impressions += rounded(stable_value(handle, 1, 100_000.0, 150_000.0));
        comments += rounded(stable_value(handle, 2, 2_500.0, 3_500.0));
        shares += rounded(stable_value(handle, 3, 1_000.0, 1_800.0));
        rate_sum += stable_value(handle, 4, 4.1, 5.2);
        sources += 1;
    }

    if impressions == 0 && !loading {
        return PLACEHOLDER;
    }

    let engagement_rate = if sources > 0 {
        round2(rate_sum / f64::from(sources))
    } else {
        0.0
    };

    UnifiedMetrics {
        total_impressions: impressions,
        engagement_rate,
        total_comments: comments,
        total_shares: shares,
        growth_rate: GROWTH_RATE,
    }
}

#[allow(clippy::cast_precision_loss)]
fn rate_percent(actions: u64, impressions: u64) -> f64 {
    actions as f64 / impressions as f64 * 100.0
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rounded(value: f64) -> u64 {
    value.round() as u64
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn non_zero(value: Option<u64>) -> Option<u64> {
    value.filter(|v| *v > 0)
}
