use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use serde_json::json;

use super::domain::{DisplaySchedule, PricingRequest, PricingResult};
use super::service::PricingService;

/// Router builder exposing the quote and rate-card descriptor endpoints.
pub fn pricing_router(service: Arc<PricingService>) -> Router {
    Router::new()
        .route("/api/v1/pricing/quotes", post(quote_handler))
        .route("/api/v1/pricing/ratecard", get(ratecard_handler))
        .with_state(service)
}

/// Quote envelope: the deterministic result plus request-time metadata.
#[derive(Debug, Serialize)]
pub(crate) struct QuoteResponse {
    pub(crate) quoted_on: NaiveDate,
    #[serde(flatten)]
    pub(crate) result: PricingResult,
}

pub(crate) async fn quote_handler(
    State(service): State<Arc<PricingService>>,
    axum::Json(request): axum::Json<PricingRequest>,
) -> Response {
    match service.calculate_pricing(&request) {
        Ok(result) => {
            let response = QuoteResponse {
                quoted_on: Local::now().date_naive(),
                result,
            };
            (StatusCode::OK, axum::Json(response)).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RateCardDescriptor {
    pub(crate) version: String,
    pub(crate) supported_terms: Vec<u32>,
    pub(crate) packages: Vec<PackageDescriptor>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PackageDescriptor {
    pub(crate) id: String,
    pub(crate) price: u64,
    pub(crate) schedule: DisplaySchedule,
    pub(crate) frequency_label: String,
}

/// Snapshot descriptor so callers offer only choices the active card can
/// price.
pub(crate) async fn ratecard_handler(State(service): State<Arc<PricingService>>) -> Response {
    let card = service.current_ratecard();
    let descriptor = RateCardDescriptor {
        version: card.version().to_string(),
        supported_terms: card.supported_terms(),
        packages: card
            .packages()
            .map(|(id, package)| PackageDescriptor {
                id: id.to_string(),
                price: package.price,
                schedule: package.schedule,
                frequency_label: package.frequency_label.clone(),
            })
            .collect(),
    };
    (StatusCode::OK, axum::Json(descriptor)).into_response()
}
