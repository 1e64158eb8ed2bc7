use std::sync::Arc;

use super::common::*;
use crate::pricing::ratecard::{RateCard, RateCardRepository};
use crate::pricing::service::PricingService;

#[test]
fn identical_requests_produce_identical_results() {
    let service = standard_service();
    let request = single_compact_request();

    let first = service
        .calculate_pricing(&request)
        .expect("request prices");
    let second = service
        .calculate_pricing(&request)
        .expect("request prices");

    assert_eq!(first, second);
}

#[test]
fn results_are_stamped_with_the_card_version() {
    let result = quote(&single_compact_request());
    assert_eq!(
        result.ratecard_version,
        RateCard::standard().version().to_string()
    );
}

#[test]
fn installing_a_new_card_changes_later_quotes_not_earlier_ones() {
    let repository = Arc::new(RateCardRepository::new(RateCard::standard()));
    let service = PricingService::new(repository);
    let request = single_compact_request();

    let before = service
        .calculate_pricing(&request)
        .expect("request prices");

    let mut revised = RateCard::standard();
    revised.version = "revised-2026.09".to_string();
    revised
        .packages
        .get_mut("daily-30")
        .expect("standard card carries daily-30")
        .price = 12_000;
    service.install_ratecard(revised);

    let after = service
        .calculate_pricing(&request)
        .expect("request prices against the new card");

    assert_eq!(before.monthly_display_cost, 10_000);
    assert_eq!(before.ratecard_version, "standard-2026.08");
    assert_eq!(after.monthly_display_cost, 12_000);
    assert_eq!(after.ratecard_version, "revised-2026.09");
}

#[test]
fn a_loaded_snapshot_outlives_replacement() {
    let repository = Arc::new(RateCardRepository::new(RateCard::standard()));
    let held = repository.current();

    let mut revised = RateCard::standard();
    revised.version = "revised-2026.09".to_string();
    repository.install(revised);

    assert_eq!(held.version(), "standard-2026.08");
    assert_eq!(repository.current().version(), "revised-2026.09");
}
