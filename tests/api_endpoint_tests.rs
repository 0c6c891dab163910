//! Paths, verbs, and payloads of the REST surface.

mod session_support;

use std::sync::Arc;

use chrono::NaiveDate;
use feedctl::auth::MemorySessionStore;
use feedctl::client::ApiClient;
use feedctl::error::FeedError;
use feedctl::types::{FeedPatch, FeedRename, FeedUpdate, LogLevel, LogQuery, NewFeed};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use session_support::{api_path, client_for, requests_to};

fn ok(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "message": message }))
}

fn authed_client(server: &MockServer) -> ApiClient {
    client_for(server, Arc::new(MemorySessionStore::with_token("T1")))
}

// ---------------------------------------------------------------------------
// Feeds
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_feed_parses_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/rss/3")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "name": "Pluto",
            "url": "https://mikan.example/rss/3",
            "last_updated": "Tue, 15 Oct 2024 10:00:00 GMT"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let feed = authed_client(&server).get_feed(3).await.expect("feed");

    assert_eq!(feed.name, "Pluto");
    assert!(feed.should_update);
    assert!(feed.last_updated_at().is_some());
}

#[tokio::test]
async fn missing_feed_surfaces_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/rss/99")))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "RSS feed not found" })),
        )
        .mount(&server)
        .await;

    let err = authed_client(&server)
        .get_feed(99)
        .await
        .expect_err("404");

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "API error (status 404): RSS feed not found");
}

#[tokio::test]
async fn create_feed_posts_name_and_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("/rss")))
        .and(body_json(json!({ "name": "Pluto", "url": "https://mikan.example/rss/3" })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "message": "RSS feed created successfully!", "feed_id": 3 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let created = authed_client(&server)
        .create_feed(&NewFeed::new("Pluto", "https://mikan.example/rss/3"))
        .await
        .expect("created");

    assert_eq!(created.feed_id, 3);
}

#[tokio::test]
async fn update_feed_puts_full_record() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(api_path("/rss/3")))
        .and(body_json(json!({
            "name": "Pluto",
            "url": "https://mikan.example/rss/3",
            "should_update": false
        })))
        .respond_with(ok("RSS feed updated successfully!"))
        .expect(1)
        .mount(&server)
        .await;

    let update = FeedUpdate {
        name: "Pluto".into(),
        url: "https://mikan.example/rss/3".into(),
        should_update: false,
    };
    let status = authed_client(&server)
        .update_feed(3, &update)
        .await
        .expect("updated");

    assert_eq!(status.message.as_deref(), Some("RSS feed updated successfully!"));
}

#[tokio::test]
async fn patch_feed_sends_only_set_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(api_path("/rss/3")))
        .and(body_json(json!({ "should_update": false })))
        .respond_with(ok("RSS feed updated successfully!"))
        .expect(1)
        .mount(&server)
        .await;

    let patch = FeedPatch::builder().should_update(false).build();
    authed_client(&server)
        .patch_feed(3, &patch)
        .await
        .expect("patched");
}

#[tokio::test]
async fn empty_patch_is_rejected_locally() {
    let server = MockServer::start().await;
    let err = authed_client(&server)
        .patch_feed(3, &FeedPatch::default())
        .await
        .expect_err("empty patch");

    assert!(matches!(err, FeedError::InvalidArgument(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn rename_and_delete_use_their_routes() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(api_path("/rss/3/rename")))
        .and(body_json(json!({ "old_name": "Pluto", "new_name": "PLUTO" })))
        .respond_with(ok("renamed"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(api_path("/rss/3")))
        .respond_with(ok("RSS feed deleted successfully!"))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    client
        .rename_feed(
            3,
            &FeedRename {
                old_name: "Pluto".into(),
                new_name: "PLUTO".into(),
            },
        )
        .await
        .expect("renamed");
    client.delete_feed(3).await.expect("deleted");
}

#[tokio::test]
async fn bulk_refresh_reports_each_feed_in_order() {
    let server = MockServer::start().await;
    for id in [1, 3] {
        Mock::given(method("POST"))
            .and(path(api_path(&format!("/rss/{id}/refresh"))))
            .respond_with(ok("RSS feed refreshed successfully!"))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("POST"))
        .and(path(api_path("/rss/2/refresh")))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "RSS feed not found" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let outcomes = authed_client(&server).refresh_feeds(&[1, 2, 3]).await;

    let ids: Vec<i64> = outcomes.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(outcomes[0].1.is_ok());
    assert_eq!(outcomes[1].1.as_ref().unwrap_err().status(), Some(404));
    assert!(outcomes[2].1.is_ok());
}

#[tokio::test]
async fn feed_with_null_flag_does_not_hide_the_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/rss")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1,
                "name": "Pluto",
                "url": "https://mikan.example/rss/1",
                "last_updated": "Tue, 15 Oct 2024 10:00:00 GMT",
                "should_update": null
            },
            {
                "id": 2,
                "name": "Frieren",
                "url": "https://mikan.example/rss/2",
                "last_updated": "Tue, 15 Oct 2024 10:00:00 GMT",
                "should_update": true
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let feeds = authed_client(&server).list_feeds().await.expect("feeds");

    assert_eq!(feeds.len(), 2);
    assert!(!feeds[0].should_update);
    assert!(feeds[1].should_update);
}

// ---------------------------------------------------------------------------
// Magnets
// ---------------------------------------------------------------------------

#[tokio::test]
async fn magnets_for_feed_parses_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/magnets/rss/3")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 10,
            "rss_feed_id": 3,
            "title": "[Sub] Pluto - 01",
            "name": "Pluto",
            "magnet_link": "magnet:?xt=urn:btih:abc",
            "status": false,
            "timestamp": "Tue, 15 Oct 2024 10:00:00 GMT"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let magnets = authed_client(&server)
        .magnets_for_feed(3)
        .await
        .expect("magnets");

    assert_eq!(magnets.len(), 1);
    assert_eq!(magnets[0].rss_feed_id, 3);
    assert!(!magnets[0].status);
    assert!(magnets[0].timestamp_at().is_some());
}

#[tokio::test]
async fn magnet_delete_and_retry_use_their_routes() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(api_path("/magnets/10")))
        .respond_with(ok("deleted"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("/magnets/10/retry")))
        .respond_with(ok("queued"))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server);
    client.delete_magnet(10).await.expect("deleted");
    let retry = client.retry_magnet(10).await.expect("retried");

    assert_eq!(retry.message.as_deref(), Some("queued"));
}

// ---------------------------------------------------------------------------
// Logs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn default_log_query_sends_service_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/logs")))
        .and(query_param("level", "ALL"))
        .and(query_param("start_date", ""))
        .and(query_param("end_date", ""))
        .and(query_param("include_details", "true"))
        .and(query_param("page", "1"))
        .and(query_param("page_size", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "logs": ["2024-10-15 10:00:00 | INFO | started"],
            "total": 1,
            "page": 1,
            "page_size": 20,
            "total_pages": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = authed_client(&server)
        .fetch_logs(&LogQuery::default())
        .await
        .expect("logs");

    assert_eq!(page.total, 1);
    assert_eq!(page.logs.len(), 1);
}

#[tokio::test]
async fn filtered_log_query_formats_dates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/logs")))
        .and(query_param("level", "ERROR"))
        .and(query_param("start_date", "2024-10-01"))
        .and(query_param("end_date", "2024-10-15"))
        .and(query_param("include_details", "false"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "logs": [],
            "total": 21,
            "page": 2,
            "page_size": 20,
            "total_pages": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = LogQuery::builder()
        .level(LogLevel::Error)
        .start_date(NaiveDate::from_ymd_opt(2024, 10, 1).unwrap())
        .end_date(NaiveDate::from_ymd_opt(2024, 10, 15).unwrap())
        .include_details(false)
        .page(2)
        .build();
    let page = authed_client(&server)
        .fetch_logs(&query)
        .await
        .expect("logs");

    assert_eq!(page.total_pages, 2);
    assert!(page.logs.is_empty());
}

#[tokio::test]
async fn invalid_log_query_is_not_sent() {
    let server = MockServer::start().await;
    let query = LogQuery::builder()
        .start_date(NaiveDate::from_ymd_opt(2024, 10, 15).unwrap())
        .end_date(NaiveDate::from_ymd_opt(2024, 10, 1).unwrap())
        .build();

    let err = authed_client(&server)
        .fetch_logs(&query)
        .await
        .expect_err("reversed range");

    assert!(matches!(err, FeedError::InvalidArgument(_)));
    assert!(requests_to(&server, "/logs").await.is_empty());
}

#[tokio::test]
async fn login_logs_parse_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("/login_logs")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "logs": [
                { "time": "2024-10-15 10:00:00", "ip_address": "10.0.0.2", "username": "admin" },
                { "time": "2024-10-14 09:30:00", "ip_address": "10.0.0.3", "username": "admin" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let history = authed_client(&server).login_logs().await.expect("history");

    assert_eq!(history.logs.len(), 2);
    assert_eq!(history.logs[0].ip_address, "10.0.0.2");
}
