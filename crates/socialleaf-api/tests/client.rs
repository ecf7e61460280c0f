//! Integration tests for `SocialApiClient` using wiremock HTTP mocks.

use socialleaf_api::{ApiError, SocialApiClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> SocialApiClient {
    SocialApiClient::new(base_url, 30, "socialleaf-test/0.1")
        .expect("client construction should not fail")
}

#[tokio::test]
async fn featured_youtube_returns_channel_list() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        {
            "channel": {
                "id": "UCX6OQ3DkcsbYNE6H8uQQuVA",
                "title": "MrBeast",
                "customUrl": "@MrBeast",
                "statistics": { "subscribers": 320000000, "views": 61000000000, "videos": 800 }
            },
            "recent_videos": [
                { "id": "v1", "title": "A video", "statistics": { "views": 90000000, "likes": 4000000, "comments": 120000 } }
            ]
        },
        {
            "channel": { "id": "UCq-Fj5jknLsUf-MWSy4_brA", "title": "T-Series" },
            "recent_videos": []
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/youtube/featured"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let channels = client
        .fetch_featured_youtube()
        .await
        .expect("should parse featured list");

    assert_eq!(channels.len(), 2);
    assert_eq!(channels[0].channel.title, "MrBeast");
    assert_eq!(channels[0].recent_videos.len(), 1);
    assert!(channels[1].channel.statistics.is_none());
}

#[tokio::test]
async fn youtube_canonical_shape_parses_directly() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "channel": {
            "id": "UC1",
            "title": "Some Channel",
            "statistics": { "subscribers": 1000, "views": 50000, "videos": 12 }
        },
        "recent_videos": []
    });

    Mock::given(method("GET"))
        .and(path("/api/real/youtube"))
        .and(query_param("handle", "somechannel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let snap = client
        .fetch_youtube("somechannel")
        .await
        .expect("should parse canonical shape");

    assert_eq!(snap.channel.title, "Some Channel");
    assert_eq!(snap.channel.statistics.unwrap().views, 50_000);
}

#[tokio::test]
async fn youtube_legacy_shape_is_remapped() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "platform": "youtube",
        "connected": true,
        "is_public": true,
        "account": {
            "id": "UCX6OQ3DkcsbYNE6H8uQQuVA",
            "username": "@MrBeast",
            "name": "MrBeast",
            "profile_picture": "https://yt3.example/pic.jpg"
        },
        "metrics": { "subscribers": 320000000, "views": 61000000000, "videos": 800 },
        "recent_videos": [
            { "id": "v1", "title": "A video", "statistics": { "views": 90000000, "likes": 4000000, "comments": 120000 } }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/real/youtube"))
        .and(query_param("handle", "mrbeast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let snap = client
        .fetch_youtube("mrbeast")
        .await
        .expect("should remap legacy shape");

    assert_eq!(snap.channel.id, "UCX6OQ3DkcsbYNE6H8uQQuVA");
    assert_eq!(snap.channel.custom_url.as_deref(), Some("@MrBeast"));
    assert_eq!(snap.channel.statistics.unwrap().subscribers, 320_000_000);
    assert_eq!(snap.recent_videos.len(), 1);
}

#[tokio::test]
async fn youtube_not_connected_is_typed() {
    let server = MockServer::start().await;

    let body = serde_json::json!({ "connected": false, "message": "YouTube not connected." });

    Mock::given(method("GET"))
        .and(path("/api/real/youtube"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_youtube("nobody").await;

    assert!(matches!(
        result,
        Err(ApiError::NotConnected { platform: "youtube" })
    ));
}

#[tokio::test]
async fn instagram_parses_full_body() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "account": { "username": "natgeo", "name": "National Geographic" },
        "metrics": {
            "impressions": 5400000,
            "posts": 120,
            "reach": 2100000,
            "comments_count": 86000,
            "like_count": 940000
        },
        "analytics": [
            { "day": "Mon", "engagement": 4100, "reach": 310000 },
            { "day": "Tue", "engagement": 3900, "reach": 295000 }
        ],
        "is_simulated": true
    });

    Mock::given(method("GET"))
        .and(path("/api/real/instagram"))
        .and(query_param("handle", "natgeo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let snap = client
        .fetch_instagram(Some("natgeo"))
        .await
        .expect("should parse instagram body");

    assert_eq!(snap.account.unwrap().username, "natgeo");
    assert_eq!(snap.metrics.unwrap().impressions, 5_400_000);
    assert_eq!(snap.analytics.unwrap().len(), 2);
    assert_eq!(snap.is_simulated, Some(true));
}

#[tokio::test]
async fn instagram_without_handle_omits_query_param() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/real/instagram"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "metrics": { "impressions": 1, "posts": 1 } })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let snap = client.fetch_instagram(None).await.expect("should fetch");
    assert_eq!(snap.metrics.unwrap().impressions, 1);
}

#[tokio::test]
async fn server_error_status_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/youtube/featured"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_featured_youtube().await;

    assert!(
        matches!(result, Err(ApiError::UnexpectedStatus { status: 502, .. })),
        "expected UnexpectedStatus(502), got: {result:?}"
    );
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/real/youtube"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_youtube("mrbeast").await;

    assert!(matches!(result, Err(ApiError::Deserialize { .. })));
}
