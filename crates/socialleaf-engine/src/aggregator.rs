use std::sync::Arc;

use socialleaf_api::{ApiError, SocialApiClient};
use socialleaf_core::metrics::{TrendPoint, UnifiedMetrics};
use socialleaf_core::snapshot::{PlatformSnapshot, YoutubeSnapshot};
use socialleaf_core::{AppConfig, ConnectionMap, Platform};
use socialleaf_store::{CacheEnvelope, ConnectionStore, SnapshotCache, StoreEvent};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::state::EngineState;
use crate::{metrics, trend};

/// The aggregation service: owns snapshot slots, the connection registry
/// view, and the persisted cache, and exposes refresh operations plus the
/// derived dashboard views.
///
/// Wrap it in an [`Arc`] to share between the connection watcher, a server,
/// and request handlers.
pub struct Aggregator {
    client: SocialApiClient,
    store: ConnectionStore,
    cache: SnapshotCache,
    state: RwLock<EngineState>,
}

impl Aggregator {
    #[must_use]
    pub fn new(client: SocialApiClient, store: ConnectionStore, cache: SnapshotCache) -> Self {
        Self {
            client,
            store,
            cache,
            state: RwLock::new(EngineState::initial()),
        }
    }

    /// Builds the full service from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        let client = SocialApiClient::new(
            &config.api_base_url,
            config.http_timeout_secs,
            &config.http_user_agent,
        )?;
        let store = ConnectionStore::new(&config.data_dir);
        let ttl_ms = i64::try_from(config.cache_ttl_secs.saturating_mul(1_000)).unwrap_or(i64::MAX);
        let cache = SnapshotCache::new(&config.data_dir, ttl_ms);
        Ok(Self::new(client, store, cache))
    }

    /// First-load entry point: hydrate from the snapshot cache when it is
    /// still fresh, otherwise perform a full refresh. Either way, finish with
    /// a deep-fetch pass so a shallow cached snapshot cannot starve the trend
    /// chart.
    pub async fn initialize(&self) {
        if let Some(envelope) = self.cache.load_fresh(now_ms()) {
            let connections = self.store.load();
            {
                let mut state = self.state.write().await;
                state.youtube.snapshot = envelope.youtube;
                state.instagram.snapshot = envelope.instagram;
                state.last_fetch = Some(envelope.timestamp);
                state.connections = connections;
                state.loading = false;
            }
            tracing::debug!("hydrated from snapshot cache; skipping network refresh");
        } else {
            self.refresh_all().await;
        }
        self.ensure_deep_data().await;
    }

    /// Clears the persisted cache, reloads the connection registry, and
    /// fetches every first-party platform concurrently. Individual fetch
    /// failures are logged and leave the previous snapshot untouched; this
    /// never fails as a whole.
    pub async fn refresh_all(&self) {
        self.state.write().await.loading = true;

        if let Err(e) = self.cache.invalidate() {
            tracing::warn!(error = %e, "failed to clear snapshot cache");
        }

        let connections = self.store.load();
        self.state.write().await.connections = connections.clone();

        tokio::join!(
            self.fetch_youtube(&connections),
            self.fetch_instagram(&connections),
        );

        let mut state = self.state.write().await;
        state.last_fetch = Some(now_ms());
        state.loading = false;
    }

    /// Targeted re-sync for one platform. Registry-only platforms have
    /// nothing to fetch.
    pub async fn refresh_platform(&self, platform: Platform) {
        if !platform.has_first_party_api() {
            tracing::debug!(%platform, "no first-party integration; nothing to fetch");
            return;
        }

        let connections = self.store.load();
        match platform {
            Platform::Youtube => self.fetch_youtube(&connections).await,
            Platform::Instagram => self.fetch_instagram(&connections).await,
            Platform::Twitter | Platform::Linkedin => unreachable!(),
        }
        self.state.write().await.last_fetch = Some(now_ms());
    }

    /// One-shot deep-fetch pass: if a platform is connected but its snapshot
    /// is missing the deep fields (recent videos / metrics + analytics), and
    /// no fetch for it is in flight, issue exactly one targeted re-fetch.
    pub async fn ensure_deep_data(&self) {
        let (youtube_needed, instagram_needed, connections) = {
            let state = self.state.read().await;
            if state.loading {
                return;
            }
            let connections = state.connections.clone();

            let yt_addressable = connections
                .status(Platform::Youtube)
                .filter(|s| s.connected)
                .is_some_and(|s| {
                    s.public_handle.as_deref().is_some_and(|h| !h.is_empty())
                        || s.channel_id.as_deref().is_some_and(|c| !c.is_empty())
                });
            let youtube_needed = yt_addressable
                && !state.youtube.loading
                && state
                    .youtube
                    .snapshot
                    .as_ref()
                    .is_none_or(|s| s.recent_videos.is_empty());

            let ig_addressable = connections
                .status(Platform::Instagram)
                .filter(|s| s.connected)
                .is_some_and(|s| s.public_handle.as_deref().is_some_and(|h| !h.is_empty()));
            let instagram_needed = ig_addressable
                && !state.instagram.loading
                && state
                    .instagram
                    .snapshot
                    .as_ref()
                    .is_none_or(|s| s.metrics.is_none() || s.analytics.is_none());

            (youtube_needed, instagram_needed, connections)
        };

        if youtube_needed {
            tracing::info!("proactively fetching deep youtube data");
            self.fetch_youtube(&connections).await;
        }
        if instagram_needed {
            tracing::info!("proactively fetching deep instagram data");
            self.fetch_instagram(&connections).await;
        }
    }

    /// Spawns the registry watcher: every connection change published by the
    /// store triggers one full refresh followed by a deep-fetch pass.
    pub fn watch_connections(self: &Arc<Self>) -> JoinHandle<()> {
        let aggregator = Arc::clone(self);
        let mut rx = aggregator.store.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(StoreEvent::ConnectionsChanged(_)) => {
                        tracing::info!("connection registry changed; refreshing platform data");
                        aggregator.refresh_all().await;
                        aggregator.ensure_deep_data().await;
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "connection watcher lagged behind store events");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }

    /// The connection store this aggregator watches. In-process mutators must
    /// go through this instance so their change events land on the same bus.
    #[must_use]
    pub fn store(&self) -> &ConnectionStore {
        &self.store
    }

    pub async fn connections(&self) -> ConnectionMap {
        self.state.read().await.connections.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Completion time of the last refresh, epoch milliseconds.
    pub async fn last_fetch(&self) -> Option<i64> {
        self.state.read().await.last_fetch
    }

    pub async fn snapshot(&self, platform: Platform) -> Option<PlatformSnapshot> {
        let state = self.state.read().await;
        match platform {
            Platform::Youtube => state.youtube.snapshot.clone().map(PlatformSnapshot::Youtube),
            Platform::Instagram => state
                .instagram
                .snapshot
                .clone()
                .map(PlatformSnapshot::Instagram),
            Platform::Twitter | Platform::Linkedin => None,
        }
    }

    /// Current unified dashboard totals, derived from live state.
    pub async fn unified_metrics(&self) -> UnifiedMetrics {
        let state = self.state.read().await;
        metrics::compute_unified_metrics(
            state.youtube.snapshot.as_ref(),
            state.instagram.snapshot.as_ref(),
            &state.connections,
            state.loading,
        )
    }

    /// Current 7-day engagement trend series, derived from live state.
    pub async fn engagement_trends(&self) -> Vec<TrendPoint> {
        let state = self.state.read().await;
        trend::compute_engagement_trends(
            state.youtube.snapshot.as_ref(),
            state.instagram.snapshot.as_ref(),
            &state.connections,
        )
    }

    async fn fetch_youtube(&self, connections: &ConnectionMap) {
        let generation = self.state.write().await.youtube.begin();

        let handle = connections
            .status(Platform::Youtube)
            .filter(|s| s.connected)
            .and_then(|s| s.public_handle.clone())
            .filter(|h| !h.is_empty());

        let outcome = match handle.as_deref() {
            Some(h) => self.client.fetch_youtube(h).await.map(Some),
            None => self
                .client
                .fetch_featured_youtube()
                .await
                .map(Self::select_featured),
        };

        let snapshot = match outcome {
            Ok(snapshot) => snapshot,
            Err(ApiError::NotConnected { .. }) => {
                tracing::debug!(platform = "youtube", "backend reports not connected");
                None
            }
            Err(e) => {
                tracing::warn!(platform = "youtube", error = %e, "fetch failed; keeping previous snapshot");
                None
            }
        };

        let fetched = snapshot.is_some();
        let landed = self.state.write().await.youtube.finish(generation, snapshot);
        if !landed {
            tracing::debug!(platform = "youtube", "discarding superseded fetch result");
        } else if fetched {
            self.persist_cache().await;
        }
    }

    async fn fetch_instagram(&self, connections: &ConnectionMap) {
        let Some(status) = connections
            .status(Platform::Instagram)
            .filter(|s| s.connected)
        else {
            return;
        };
        let handle = status.public_handle.clone().filter(|h| !h.is_empty());

        let generation = self.state.write().await.instagram.begin();

        let snapshot = match self.client.fetch_instagram(handle.as_deref()).await {
            Ok(snapshot) => Some(snapshot),
            Err(ApiError::NotConnected { .. }) => {
                tracing::debug!(platform = "instagram", "backend reports not connected");
                None
            }
            Err(e) => {
                tracing::warn!(platform = "instagram", error = %e, "fetch failed; keeping previous snapshot");
                None
            }
        };

        let fetched = snapshot.is_some();
        let landed = self
            .state
            .write()
            .await
            .instagram
            .finish(generation, snapshot);
        if !landed {
            tracing::debug!(platform = "instagram", "discarding superseded fetch result");
        } else if fetched {
            self.persist_cache().await;
        }
    }

    /// Picks the dashboard's featured channel: the MrBeast entry when the
    /// list contains one, the first entry otherwise.
    fn select_featured(channels: Vec<YoutubeSnapshot>) -> Option<YoutubeSnapshot> {
        let position = channels.iter().position(|c| {
            c.channel.title.to_lowercase().contains("mrbeast")
                || c.channel
                    .custom_url
                    .as_deref()
                    .is_some_and(|u| u.to_lowercase().contains("mrbeast"))
        });
        match position {
            Some(i) => channels.into_iter().nth(i),
            None => channels.into_iter().next(),
        }
    }

    /// Writes the current snapshots back to the cache envelope. Skipped while
    /// both slots are empty; failures are logged and swallowed.
    async fn persist_cache(&self) {
        let envelope = {
            let state = self.state.read().await;
            if state.youtube.snapshot.is_none() && state.instagram.snapshot.is_none() {
                return;
            }
            CacheEnvelope {
                youtube: state.youtube.snapshot.clone(),
                instagram: state.instagram.snapshot.clone(),
                timestamp: now_ms(),
            }
        };
        if let Err(e) = self.cache.store(&envelope) {
            tracing::warn!(error = %e, "failed to persist snapshot cache");
        }
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use socialleaf_core::snapshot::YoutubeChannel;

    fn named(title: &str, custom_url: Option<&str>) -> YoutubeSnapshot {
        YoutubeSnapshot {
            channel: YoutubeChannel {
                id: format!("UC_{title}"),
                title: title.to_owned(),
                custom_url: custom_url.map(str::to_owned),
                ..YoutubeChannel::default()
            },
            recent_videos: vec![],
        }
    }

    #[test]
    fn select_featured_prefers_mrbeast_by_title() {
        let picked = Aggregator::select_featured(vec![
            named("T-Series", None),
            named("MrBeast", Some("@MrBeast")),
        ])
        .unwrap();
        assert_eq!(picked.channel.title, "MrBeast");
    }

    #[test]
    fn select_featured_matches_custom_url_case_insensitively() {
        let picked = Aggregator::select_featured(vec![
            named("T-Series", None),
            named("Beast Channel", Some("@MRBEAST")),
        ])
        .unwrap();
        assert_eq!(picked.channel.title, "Beast Channel");
    }

    #[test]
    fn select_featured_falls_back_to_first() {
        let picked =
            Aggregator::select_featured(vec![named("T-Series", None), named("PewDiePie", None)])
                .unwrap();
        assert_eq!(picked.channel.title, "T-Series");
    }

    #[test]
    fn select_featured_empty_list_is_none() {
        assert!(Aggregator::select_featured(vec![]).is_none());
    }
}
