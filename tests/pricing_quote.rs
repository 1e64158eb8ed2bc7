//! End-to-end checks for the pricing HTTP surface: a quote priced through
//! the public router and the rate-card descriptor callers build their forms
//! from.

use advert_pricing::pricing::{pricing_router, PricingService};
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn build_router() -> axum::Router {
    pricing_router(Arc::new(PricingService::with_standard_card()))
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    serde_json::from_slice(&body).expect("json")
}

#[tokio::test]
async fn post_quote_returns_the_itemized_breakdown() {
    let router = build_router();

    let payload = json!({
        "category": "main_banner",
        "display_type": "single",
        "size": "compact",
        "package_id": "daily-30",
        "months": 12,
        "advertiser": { "active_adverts": 8 }
    });

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/pricing/quotes")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_vec(&payload).expect("serialize request"),
        ))
        .expect("request");

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);

    let quote = json_body(response).await;
    assert_eq!(quote.get("setup_fee").and_then(Value::as_u64), Some(30_000));
    assert_eq!(
        quote.get("total_recurring_cost").and_then(Value::as_u64),
        Some(108_000)
    );
    assert_eq!(
        quote.get("subtotal_before_discount").and_then(Value::as_u64),
        Some(138_000)
    );
    assert_eq!(
        quote.get("total_discount").and_then(Value::as_u64),
        Some(20_700)
    );
    assert_eq!(
        quote.get("final_amount_payable").and_then(Value::as_u64),
        Some(117_300)
    );

    let discounts = quote
        .get("discounts")
        .and_then(Value::as_array)
        .expect("discount list");
    assert_eq!(discounts.len(), 1);
    assert_eq!(
        discounts[0].get("kind").and_then(Value::as_str),
        Some("volume")
    );

    assert!(quote.get("quoted_on").is_some());
    assert!(quote.get("ratecard_version").is_some());
}

#[tokio::test]
async fn post_quote_rejects_choices_the_card_cannot_price() {
    let router = build_router();

    let payload = json!({
        "category": "main_banner",
        "display_type": "single",
        "size": "compact",
        "package_id": "daily-90",
        "months": 1
    });

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/pricing/quotes")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&payload).expect("serialize request"),
                ))
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let payload = json_body(response).await;
    let message = payload
        .get("error")
        .and_then(Value::as_str)
        .expect("error message");
    assert!(message.contains("daily-90"));
}

#[tokio::test]
async fn ratecard_descriptor_lists_the_choices_on_offer() {
    let router = build_router();

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/pricing/ratecard")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);

    let descriptor = json_body(response).await;
    assert!(descriptor.get("version").is_some());

    let terms: Vec<u64> = descriptor
        .get("supported_terms")
        .and_then(Value::as_array)
        .expect("terms")
        .iter()
        .filter_map(Value::as_u64)
        .collect();
    assert_eq!(terms, vec![1, 3, 4, 6, 9, 12, 18, 24]);

    let packages = descriptor
        .get("packages")
        .and_then(Value::as_array)
        .expect("packages");
    let daily_30 = packages
        .iter()
        .find(|package| package.get("id").and_then(Value::as_str) == Some("daily-30"))
        .expect("daily-30 on offer");
    assert_eq!(daily_30.get("price").and_then(Value::as_u64), Some(10_000));
}
