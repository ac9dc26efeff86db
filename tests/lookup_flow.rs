//! End-to-end lookup tests against a mock upstream.

use std::time::{Duration, Instant};

use serde_json::{json, Value};

mod common;

const FOUND: &str = r#"{"success":true,"result":{"records":[{"id":"60570703","tozeret_nm":"TOYOTA"}]}}"#;
const EMPTY: &str = r#"{"success":true,"result":{"records":[]}}"#;
const REJECTED: &str = r#"{"success":false}"#;

async fn get_json(url: String) -> (u16, Value) {
    let res = common::client().get(url).send().await.expect("Relay unreachable");
    let status = res.status().as_u16();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn test_found_returns_first_record() {
    let upstream = common::start_mock_upstream(200, FOUND).await;
    let relay = common::start_relay(common::relay_config(upstream.url(), 5)).await;

    let (status, body) = get_json(relay.url("/api/vehicle/60570703")).await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({"success": true, "data": {"id": "60570703", "tozeret_nm": "TOYOTA"}})
    );
    assert_eq!(upstream.hits(), 1);
    relay.shutdown.trigger();
}

#[tokio::test]
async fn test_query_is_digit_normalized() {
    let upstream = common::start_mock_upstream(200, EMPTY).await;
    let relay = common::start_relay(common::relay_config(upstream.url(), 5)).await;

    let (status, _) = get_json(relay.url("/api/vehicle/12-34567")).await;
    assert_eq!(status, 200);

    let requests = upstream.requests();
    assert_eq!(requests.len(), 1);
    let sent = url::Url::parse(&format!("http://upstream{}", requests[0])).unwrap();
    let pairs: Vec<(String, String)> = sent.query_pairs().into_owned().collect();
    assert_eq!(
        pairs,
        vec![
            ("resource_id".to_string(), "test-resource".to_string()),
            ("q".to_string(), "1234567".to_string()),
            ("limit".to_string(), "1".to_string()),
        ]
    );
    relay.shutdown.trigger();
}

#[tokio::test]
async fn test_zero_records_is_not_found_with_ok_status() {
    let upstream = common::start_mock_upstream(200, EMPTY).await;
    let relay = common::start_relay(common::relay_config(upstream.url(), 5)).await;

    let (status, body) = get_json(relay.url("/api/vehicle/1234567")).await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({"success": false, "message": "no vehicle found"}));
    relay.shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_failure_flag_is_api_error() {
    let upstream = common::start_mock_upstream(200, REJECTED).await;
    let relay = common::start_relay(common::relay_config(upstream.url(), 5)).await;

    let (status, body) = get_json(relay.url("/api/vehicle/1234567")).await;

    assert_eq!(status, 500);
    assert_eq!(body, json!({"success": false, "message": "API error"}));
    relay.shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_status_passes_through_once() {
    let upstream = common::start_mock_upstream(502, "bad gateway").await;
    let relay = common::start_relay(common::relay_config(upstream.url(), 5)).await;

    let (status, body) = get_json(relay.url("/api/vehicle/1234567")).await;

    assert_eq!(status, 502);
    assert_eq!(
        body,
        json!({"success": false, "message": "upstream error", "details": "Bad Gateway"})
    );
    // No retries.
    assert_eq!(upstream.hits(), 1);
    relay.shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_404_passes_through() {
    let upstream = common::start_mock_upstream(404, "").await;
    let relay = common::start_relay(common::relay_config(upstream.url(), 5)).await;

    let (status, body) = get_json(relay.url("/api/vehicle/1234567")).await;

    assert_eq!(status, 404);
    assert_eq!(body["details"], "Not Found");
    relay.shutdown.trigger();
}

#[tokio::test]
async fn test_slow_upstream_times_out_with_504() {
    let upstream = common::start_programmable_upstream(|_| async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        (200, FOUND.to_string())
    })
    .await;
    let relay = common::start_relay(common::relay_config(upstream.url(), 1)).await;

    let start = Instant::now();
    let (status, body) = get_json(relay.url("/api/vehicle/1234567")).await;
    let elapsed = start.elapsed();

    assert_eq!(status, 504);
    assert_eq!(body, json!({"success": false, "message": "upstream timeout"}));
    assert!(elapsed >= Duration::from_millis(900), "returned too early: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(3), "took {elapsed:?}");
    relay.shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_upstream_is_503() {
    let dead = common::dead_address();
    let relay = common::start_relay(common::relay_config(
        format!("http://{}/api/3/action/datastore_search", dead),
        5,
    ))
    .await;

    let (status, body) = get_json(relay.url("/api/vehicle/1234567")).await;

    assert_eq!(status, 503);
    assert_eq!(body, json!({"success": false, "message": "no response from upstream"}));
    relay.shutdown.trigger();
}

#[tokio::test]
async fn test_malformed_upstream_body_is_internal_error() {
    let upstream = common::start_mock_upstream(200, "<html>maintenance</html>").await;
    let relay = common::start_relay(common::relay_config(upstream.url(), 5)).await;

    let (status, body) = get_json(relay.url("/api/vehicle/1234567")).await;

    assert_eq!(status, 500);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "internal server error");
    assert!(body["error"].is_string());
    assert!(body.get("data").is_none());
    relay.shutdown.trigger();
}

#[tokio::test]
async fn test_invalid_lengths_never_reach_upstream() {
    let upstream = common::start_mock_upstream(200, FOUND).await;
    let relay = common::start_relay(common::relay_config(upstream.url(), 5)).await;

    for plate in ["1", "123456", "123456789", "12-345-678", "abcdefghijkl"] {
        let (status, body) = get_json(relay.url(&format!("/api/vehicle/{plate}"))).await;
        assert_eq!(status, 400, "plate {plate}");
        assert_eq!(body["success"], false);
        assert!(body["message"].is_string());
    }

    let (status, _) = get_json(relay.url("/api/vehicle/")).await;
    assert_eq!(status, 400);

    assert_eq!(upstream.hits(), 0);
    relay.shutdown.trigger();
}

#[tokio::test]
async fn test_info_and_health_do_not_touch_upstream() {
    let upstream = common::start_mock_upstream(503, "").await;
    let relay = common::start_relay(common::relay_config(upstream.url(), 5)).await;

    let (status, body) = get_json(relay.url("/")).await;
    assert_eq!(status, 200);
    assert_eq!(body["name"], "vehicle-relay");

    let (status, body) = get_json(relay.url("/health")).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");

    assert_eq!(upstream.hits(), 0);
    relay.shutdown.trigger();
}

#[tokio::test]
async fn test_unknown_path_lists_endpoints() {
    let upstream = common::start_mock_upstream(200, FOUND).await;
    let relay = common::start_relay(common::relay_config(upstream.url(), 5)).await;

    let (status, body) = get_json(relay.url("/api/vehicles/1234567")).await;

    assert_eq!(status, 404);
    assert_eq!(
        body["available_endpoints"],
        json!(["GET /", "GET /health", "GET /api/vehicle/:plateNumber"])
    );
    assert_eq!(upstream.hits(), 0);
    relay.shutdown.trigger();
}

#[tokio::test]
async fn test_concurrent_lookups_are_independent() {
    let upstream = common::start_programmable_upstream(|target| async move {
        if target.contains("q=1111111") {
            (200, FOUND.to_string())
        } else {
            (200, EMPTY.to_string())
        }
    })
    .await;
    let relay = common::start_relay(common::relay_config(upstream.url(), 5)).await;

    let hit = get_json(relay.url("/api/vehicle/1111111"));
    let miss = get_json(relay.url("/api/vehicle/2222222"));
    let ((s1, b1), (s2, b2)) = tokio::join!(hit, miss);

    assert_eq!((s1, b1["success"].clone()), (200, json!(true)));
    assert_eq!((s2, b2["success"].clone()), (200, json!(false)));
    assert_eq!(upstream.hits(), 2);
    relay.shutdown.trigger();
}
