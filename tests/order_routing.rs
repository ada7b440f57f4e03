//! Integration tests for the order-routing and resiliency layer, run against
//! a local mock server.

use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

use binance_futures_sdk::http::RetryConfig;
use binance_futures_sdk::prelude::*;

fn client_for(server: &MockServer) -> FuturesClient {
    FuturesClient::builder()
        .base_url(&server.base_url())
        .credentials("test_key", "test_secret")
        .retry(RetryConfig {
            max_retries: 2,
            base_delay: Duration::from_millis(10),
            ..RetryConfig::default()
        })
        .build()
        .unwrap()
}

// ── Credential gating ────────────────────────────────────────────────────────

#[tokio::test]
async fn signed_call_without_credentials_never_hits_network() {
    let server = MockServer::start_async().await;
    let catch_all = server
        .mock_async(|when, then| {
            when.path_contains("/fapi");
            then.status(200).json_body(json!({}));
        })
        .await;

    let client = FuturesClient::builder()
        .base_url(&server.base_url())
        .build()
        .unwrap();

    let order = NewOrderRequest::new("BTCUSDT", Side::Buy, "MARKET").quantity("0.1".parse().unwrap());
    let err = client.orders().submit(&order).await.unwrap_err();
    assert!(matches!(err, SdkError::Credential(_)), "{err}");

    let err = client.account().balance().await.unwrap_err();
    assert!(matches!(err, SdkError::Credential(_)), "{err}");

    assert_eq!(catch_all.hits_async().await, 0);
}

#[tokio::test]
async fn validation_errors_report_every_missing_field_before_network() {
    let server = MockServer::start_async().await;
    let catch_all = server
        .mock_async(|when, then| {
            when.path_contains("/fapi");
            then.status(200).json_body(json!({}));
        })
        .await;

    let client = client_for(&server);
    let err = client
        .orders()
        .submit(&NewOrderRequest::default())
        .await
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("symbol"), "{msg}");
    assert!(msg.contains("side"), "{msg}");
    assert!(msg.contains("type"), "{msg}");
    assert_eq!(catch_all.hits_async().await, 0);
}

// ── Routing ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn conditional_types_route_to_algo_endpoint_with_discriminator() {
    let server = MockServer::start_async().await;
    let algo = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/fapi/v1/algoOrder")
                .body_contains("algoType=CONDITIONAL")
                .body_contains("signature=");
            then.status(200).json_body(json!({"algoId": 12345, "success": true}));
        })
        .await;

    let client = client_for(&server);
    let types = [
        "STOP_MARKET",
        "TAKE_PROFIT_MARKET",
        "STOP",
        "TAKE_PROFIT",
        "TRAILING_STOP_MARKET",
    ];
    for order_type in types {
        let order = NewOrderRequest::new("BTCUSDT", Side::Sell, order_type)
            .stop_price("50000".parse().unwrap())
            .quantity("0.5".parse().unwrap());
        let ack = client.orders().submit(&order).await.unwrap();
        assert!(ack.via_algo_api, "{order_type}");
        assert_eq!(ack.algo_id(), Some(12345), "{order_type}");
        assert_eq!(ack.order_id(), None, "{order_type}");
    }
    assert_eq!(algo.hits_async().await, types.len());
}

#[tokio::test]
async fn regular_types_route_to_order_endpoint() {
    let server = MockServer::start_async().await;
    let regular = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/fapi/v1/order")
                .header("X-MBX-APIKEY", "test_key")
                .body_contains("symbol=BTCUSDT")
                .body_contains("signature=");
            then.status(200)
                .json_body(json!({"orderId": 11111, "symbol": "BTCUSDT", "status": "FILLED"}));
        })
        .await;
    let algo = server
        .mock_async(|when, then| {
            when.method(POST).path("/fapi/v1/algoOrder");
            then.status(200).json_body(json!({"algoId": 1}));
        })
        .await;

    let client = client_for(&server);
    let order = NewOrderRequest::new("BTCUSDT", Side::Buy, "MARKET").quantity("0.1".parse().unwrap());
    let ack = client.orders().submit(&order).await.unwrap();

    assert!(!ack.via_algo_api);
    assert_eq!(ack.order_id(), Some(11111));
    assert_eq!(regular.hits_async().await, 1);
    assert_eq!(algo.hits_async().await, 0);
}

#[tokio::test]
async fn close_position_guardrail_applies_on_the_wire() {
    let server = MockServer::start_async().await;
    // Matches only the guardrail-stripped form of the request.
    let algo = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/fapi/v1/algoOrder")
                .body_contains("closePosition=true")
                .body_contains("algoType=CONDITIONAL");
            then.status(200).json_body(json!({"algoId": 7}));
        })
        .await;

    let client = client_for(&server);
    let order = NewOrderRequest::new("BTCUSDT", Side::Sell, "STOP_MARKET")
        .stop_price("50000".parse().unwrap())
        .quantity("0.5".parse().unwrap())
        .reduce_only(true)
        .close_position(true);
    let ack = client.orders().submit(&order).await.unwrap();

    assert!(ack.via_algo_api);
    algo.assert_async().await;
}

// ── Migration fallback ───────────────────────────────────────────────────────

#[tokio::test]
async fn migration_error_triggers_exactly_one_algo_fallback() {
    let server = MockServer::start_async().await;
    let regular = server
        .mock_async(|when, then| {
            when.method(POST).path("/fapi/v1/order");
            then.status(400)
                .json_body(json!({"code": -4120, "msg": "Order type not supported for this endpoint"}));
        })
        .await;
    let algo = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/fapi/v1/algoOrder")
                .body_contains("algoType=CONDITIONAL");
            then.status(200).json_body(json!({"algoId": 4242, "success": true}));
        })
        .await;

    let client = client_for(&server);
    // A type the client classifies as regular but the backend has migrated.
    let order = NewOrderRequest::new("BTCUSDT", Side::Sell, "STOP_LIMIT")
        .stop_price("50000".parse().unwrap())
        .quantity("0.5".parse().unwrap());
    let ack = client.orders().submit(&order).await.unwrap();

    assert!(ack.via_algo_api);
    assert_eq!(ack.algo_id(), Some(4242));
    assert_eq!(regular.hits_async().await, 1);
    assert_eq!(algo.hits_async().await, 1);
}

#[tokio::test]
async fn migration_error_propagates_when_auto_routing_disabled() {
    let server = MockServer::start_async().await;
    let regular = server
        .mock_async(|when, then| {
            when.method(POST).path("/fapi/v1/order");
            then.status(400)
                .json_body(json!({"code": -4120, "msg": "Order type not supported for this endpoint"}));
        })
        .await;
    let algo = server
        .mock_async(|when, then| {
            when.method(POST).path("/fapi/v1/algoOrder");
            then.status(200).json_body(json!({"algoId": 1}));
        })
        .await;

    let client = FuturesClient::builder()
        .base_url(&server.base_url())
        .credentials("test_key", "test_secret")
        .auto_route_conditional(false)
        .build()
        .unwrap();

    let order = NewOrderRequest::new("BTCUSDT", Side::Sell, "STOP_MARKET")
        .stop_price("50000".parse().unwrap())
        .close_position(true);
    let err = client.orders().submit(&order).await.unwrap_err();

    assert!(matches!(err, SdkError::Api(ApiError::ConditionalOrderMigrated(_))), "{err}");
    assert_eq!(regular.hits_async().await, 1);
    assert_eq!(algo.hits_async().await, 0);
}

// ── Batch submission ─────────────────────────────────────────────────────────

#[tokio::test]
async fn mixed_batch_splits_and_preserves_conditional_order() {
    let server = MockServer::start_async().await;
    let batch = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/fapi/v1/batchOrders")
                .body_contains("batchOrders=");
            then.status(200).json_body(json!([{"orderId": 1}, {"orderId": 2}]));
        })
        .await;
    let algo_first = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/fapi/v1/algoOrder")
                .body_contains("stopPrice=100");
            then.status(200).json_body(json!({"algoId": 100}));
        })
        .await;
    let algo_second = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/fapi/v1/algoOrder")
                .body_contains("stopPrice=200");
            then.status(200).json_body(json!({"algoId": 200}));
        })
        .await;

    let client = client_for(&server);
    let orders = vec![
        NewOrderRequest::new("BTCUSDT", Side::Buy, "MARKET").quantity("0.1".parse().unwrap()),
        NewOrderRequest::new("BTCUSDT", Side::Sell, "STOP_MARKET")
            .stop_price("100".parse().unwrap())
            .close_position(true),
        NewOrderRequest::new("ETHUSDT", Side::Buy, "LIMIT")
            .quantity("1".parse().unwrap())
            .price("3000".parse().unwrap()),
        NewOrderRequest::new("ETHUSDT", Side::Sell, "TAKE_PROFIT_MARKET")
            .stop_price("200".parse().unwrap())
            .close_position(true),
    ];
    let result = client.orders().submit_batch(&orders).await.unwrap();

    assert!(result.regular.is_some());
    assert_eq!(result.conditional.len(), 2);
    assert_eq!(result.conditional[0].algo_id(), Some(100));
    assert_eq!(result.conditional[1].algo_id(), Some(200));
    assert_eq!(batch.hits_async().await, 1);
    assert_eq!(algo_first.hits_async().await, 1);
    assert_eq!(algo_second.hits_async().await, 1);
}

#[tokio::test]
async fn mixed_batch_fails_fast_when_auto_split_disabled() {
    let server = MockServer::start_async().await;
    let catch_all = server
        .mock_async(|when, then| {
            when.path_contains("/fapi");
            then.status(200).json_body(json!({}));
        })
        .await;

    let client = FuturesClient::builder()
        .base_url(&server.base_url())
        .credentials("test_key", "test_secret")
        .auto_split_batches(false)
        .build()
        .unwrap();

    let orders = vec![
        NewOrderRequest::new("BTCUSDT", Side::Buy, "MARKET").quantity("0.1".parse().unwrap()),
        NewOrderRequest::new("BTCUSDT", Side::Sell, "STOP_MARKET")
            .stop_price("100".parse().unwrap())
            .close_position(true),
    ];
    let err = client.orders().submit_batch(&orders).await.unwrap_err();

    assert!(matches!(err, SdkError::Validation(_)), "{err}");
    assert_eq!(catch_all.hits_async().await, 0);
}

// ── Cancel / query fallback ──────────────────────────────────────────────────

#[tokio::test]
async fn algo_id_only_lookup_goes_straight_to_algo_endpoint() {
    let server = MockServer::start_async().await;
    let regular = server
        .mock_async(|when, then| {
            when.method(GET).path("/fapi/v1/order");
            then.status(200).json_body(json!({"orderId": 1}));
        })
        .await;
    let algo = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/fapi/v1/algoOrder")
                .query_param("algoId", "12345");
            then.status(200)
                .json_body(json!({"algoId": 12345, "status": "WORKING"}));
        })
        .await;

    let client = client_for(&server);
    let ack = client
        .orders()
        .query(&OrderRef::by_algo_id("BTCUSDT", 12345))
        .await
        .unwrap();

    assert!(ack.via_algo_api);
    assert_eq!(ack.algo_id(), Some(12345));
    assert_eq!(regular.hits_async().await, 0);
    assert_eq!(algo.hits_async().await, 1);
}

#[tokio::test]
async fn cancel_falls_back_to_algo_on_not_found_when_enabled() {
    let server = MockServer::start_async().await;
    let regular = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/fapi/v1/order");
            then.status(400)
                .json_body(json!({"code": -2013, "msg": "Order does not exist."}));
        })
        .await;
    let algo = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/fapi/v1/algoOrder")
                .body_contains("algoId=777");
            then.status(200).json_body(json!({"algoId": 777, "success": true}));
        })
        .await;

    let client = client_for(&server);
    let ack = client
        .orders()
        .cancel(&OrderRef::by_order_id("BTCUSDT", 5).with_algo_fallback(777))
        .await
        .unwrap();

    assert!(ack.via_algo_api);
    assert_eq!(regular.hits_async().await, 1);
    assert_eq!(algo.hits_async().await, 1);
}

#[tokio::test]
async fn cancel_not_found_propagates_without_fallback_flag() {
    let server = MockServer::start_async().await;
    let regular = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/fapi/v1/order");
            then.status(400)
                .json_body(json!({"code": -2013, "msg": "Order does not exist."}));
        })
        .await;
    let algo = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/fapi/v1/algoOrder");
            then.status(200).json_body(json!({"algoId": 777}));
        })
        .await;

    let client = client_for(&server);
    let err = client
        .orders()
        .cancel(&OrderRef::by_order_id("BTCUSDT", 5))
        .await
        .unwrap_err();

    let failure = err.api_failure().expect("expected an API error");
    assert_eq!(failure.code, Some(-2013));
    assert_eq!(regular.hits_async().await, 1);
    assert_eq!(algo.hits_async().await, 0);
}

// ── Retry behavior ───────────────────────────────────────────────────────────

#[tokio::test]
async fn retryable_status_exhausts_budget_then_surfaces_last_error() {
    let server = MockServer::start_async().await;
    let ping = server
        .mock_async(|when, then| {
            when.method(GET).path("/fapi/v1/ping");
            then.status(503).body("upstream unavailable");
        })
        .await;

    let client = client_for(&server);
    let err = client.market().ping().await.unwrap_err();

    let failure = err.api_failure().expect("expected an API error");
    assert_eq!(failure.status, 503);
    // Initial attempt + 2 retries.
    assert_eq!(ping.hits_async().await, 3);
}

#[tokio::test]
async fn non_retryable_status_fails_on_first_attempt() {
    let server = MockServer::start_async().await;
    let depth = server
        .mock_async(|when, then| {
            when.method(GET).path("/fapi/v1/depth");
            then.status(400)
                .json_body(json!({"code": -1121, "msg": "Invalid symbol."}));
        })
        .await;

    let client = client_for(&server);
    let err = client.market().depth("NOPEUSDT", None).await.unwrap_err();

    let failure = err.api_failure().expect("expected an API error");
    assert_eq!(failure.code, Some(-1121));
    assert_eq!(depth.hits_async().await, 1);
}

// ── Test endpoint ────────────────────────────────────────────────────────────

#[tokio::test]
async fn conditional_types_rejected_for_test_submission() {
    let server = MockServer::start_async().await;
    let catch_all = server
        .mock_async(|when, then| {
            when.path_contains("/fapi");
            then.status(200).json_body(json!({}));
        })
        .await;

    let client = client_for(&server);
    let order = NewOrderRequest::new("BTCUSDT", Side::Sell, "STOP_MARKET")
        .stop_price("50000".parse().unwrap())
        .close_position(true);
    let err = client.orders().submit_test(&order).await.unwrap_err();

    assert!(matches!(err, SdkError::Validation(_)), "{err}");
    assert_eq!(catch_all.hits_async().await, 0);
}

// ── User stream ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn listen_key_uses_api_key_header_without_signature() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/fapi/v1/listenKey")
                .header("X-MBX-APIKEY", "test_key");
            then.status(200).json_body(json!({"listenKey": "abc123"}));
        })
        .await;

    let client = client_for(&server);
    let resp = client.stream().create_listen_key().await.unwrap();

    assert_eq!(resp["listenKey"], "abc123");
    assert_eq!(create.hits_async().await, 1);
}
