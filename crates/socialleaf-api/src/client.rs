use std::time::Duration;

use reqwest::{Client, Url};
use socialleaf_core::snapshot::{InstagramSnapshot, YoutubeSnapshot};

use crate::error::ApiError;
use crate::legacy::LegacyYoutubeEnvelope;

/// Client for the Social Leaf backend REST API.
///
/// Use [`SocialApiClient::new`] with the configured base URL, or point it at
/// a mock server in tests. There is no retry or backoff here: the aggregator's
/// cache window is the only throttle against a failing backend.
pub struct SocialApiClient {
    client: Client,
    base_url: Url,
}

impl SocialApiClient {
    /// Creates a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: exactly one trailing slash so Url::join treats the last
        // path segment as a directory.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Fetches the featured channel list used when no YouTube handle is
    /// connected.
    ///
    /// # Errors
    ///
    /// - [`ApiError::UnexpectedStatus`] on a non-2xx response.
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Deserialize`] if the body does not match the expected shape.
    pub async fn fetch_featured_youtube(&self) -> Result<Vec<YoutubeSnapshot>, ApiError> {
        let url = self.endpoint("api/youtube/featured", &[])?;
        let body = self.request_json(&url).await?;
        serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
            context: "featured youtube channels".to_owned(),
            source: e,
        })
    }

    /// Fetches handle-scoped YouTube stats, accepting both the canonical
    /// `{ channel, recent_videos }` shape and the legacy
    /// `{ account, metrics, recent_videos }` shape.
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotConnected`] if the backend reports no connection.
    /// - [`ApiError::UnexpectedStatus`] on a non-2xx response.
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Deserialize`] if the body matches neither shape.
    pub async fn fetch_youtube(&self, handle: &str) -> Result<YoutubeSnapshot, ApiError> {
        let url = self.endpoint("api/real/youtube", &[("handle", handle)])?;
        let body = self.request_json(&url).await?;
        Self::check_not_connected(&body, "youtube")?;

        if body.get("channel").is_some() {
            return serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
                context: format!("youtube(handle={handle})"),
                source: e,
            });
        }

        let envelope: LegacyYoutubeEnvelope =
            serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
                context: format!("legacy youtube(handle={handle})"),
                source: e,
            })?;
        Ok(envelope.into())
    }

    /// Fetches Instagram stats, scoped to `handle` when one is connected.
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotConnected`] if the backend reports no connection.
    /// - [`ApiError::UnexpectedStatus`] on a non-2xx response.
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Deserialize`] if the body does not match the expected shape.
    pub async fn fetch_instagram(
        &self,
        handle: Option<&str>,
    ) -> Result<InstagramSnapshot, ApiError> {
        let url = match handle {
            Some(h) => self.endpoint("api/real/instagram", &[("handle", h)])?,
            None => self.endpoint("api/real/instagram", &[])?,
        };
        let body = self.request_json(&url).await?;
        Self::check_not_connected(&body, "instagram")?;

        serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
            context: format!("instagram(handle={})", handle.unwrap_or("-")),
            source: e,
        })
    }

    /// Builds the full request URL with percent-encoded query parameters.
    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ApiError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the response
    /// body as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, ApiError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Maps a `{"connected": false}` body to [`ApiError::NotConnected`].
    fn check_not_connected(
        body: &serde_json::Value,
        platform: &'static str,
    ) -> Result<(), ApiError> {
        if body.get("connected").and_then(serde_json::Value::as_bool) == Some(false) {
            return Err(ApiError::NotConnected { platform });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> SocialApiClient {
        SocialApiClient::new(base_url, 30, "socialleaf-test/0.1")
            .expect("client construction should not fail")
    }

    #[test]
    fn endpoint_joins_path_and_query() {
        let client = test_client("http://localhost:8000");
        let url = client
            .endpoint("api/real/youtube", &[("handle", "mrbeast")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/real/youtube?handle=mrbeast"
        );
    }

    #[test]
    fn endpoint_strips_duplicate_trailing_slash() {
        let client = test_client("http://localhost:8000/");
        let url = client.endpoint("api/youtube/featured", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/youtube/featured");
    }

    #[test]
    fn endpoint_encodes_handle() {
        let client = test_client("http://localhost:8000");
        let url = client
            .endpoint("api/real/youtube", &[("handle", "@Mr Beast")])
            .unwrap();
        assert!(
            url.as_str().contains("handle=%40Mr+Beast")
                || url.as_str().contains("handle=%40Mr%20Beast"),
            "handle should be percent-encoded: {url}"
        );
    }

    #[test]
    fn not_connected_body_is_detected() {
        let body = serde_json::json!({ "connected": false, "message": "YouTube not connected." });
        let err = SocialApiClient::check_not_connected(&body, "youtube").unwrap_err();
        assert!(matches!(err, ApiError::NotConnected { platform: "youtube" }));
    }
}
