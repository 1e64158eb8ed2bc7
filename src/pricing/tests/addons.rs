use super::common::*;
use crate::pricing::domain::{AdSize, AddOnKind};
use crate::pricing::ratecard::ConfigurationError;

#[test]
fn no_selection_contributes_nothing() {
    let result = quote(&single_compact_request());

    assert!(result.add_ons.is_empty());
    assert_eq!(
        result.subtotal_before_discount,
        result.setup_fee + result.total_recurring_cost
    );
}

#[test]
fn extended_exposure_is_priced_off_the_size_adjusted_monthly_base() {
    let mut request = single_compact_request();
    request.months = 12;
    request.add_ons.extended_exposure = Some("exposure-plus".to_string());

    let result = quote(&request);

    // Monthly base 40,000 (no size fee at Compact) at 10%, over 12 months.
    assert_eq!(result.add_ons.len(), 1);
    let charge = &result.add_ons[0];
    assert_eq!(charge.kind, AddOnKind::ExtendedExposure);
    assert_eq!(charge.monthly_cost, 4_000);
    assert_eq!(charge.subscription_cost, 48_000);
    assert_eq!(result.subtotal_before_discount, 30_000 + 108_000 + 48_000);
}

#[test]
fn size_fee_feeds_the_add_on_base() {
    let mut request = single_compact_request();
    request.size = AdSize::Wide;
    request.add_ons.extended_exposure = Some("exposure-plus".to_string());

    let result = quote(&request);

    // Monthly base grows to 44,000 once the 10% size fee lands.
    assert_eq!(result.add_ons[0].monthly_cost, 4_400);
}

#[test]
fn the_three_families_are_independent_and_additive() {
    let mut request = single_compact_request();
    request.add_ons.extended_exposure = Some("exposure-plus".to_string());
    request.add_ons.recurrent_after = Some("rerun-after-3".to_string());
    request.add_ons.recurrent_every = Some("rerun-every-3".to_string());

    let combined = quote(&request);
    assert_eq!(combined.add_ons.len(), 3);

    // Each family alone contributes exactly what it contributes in company.
    let mut solo_total = 0;
    for kind in [
        AddOnKind::ExtendedExposure,
        AddOnKind::RecurrentAfter,
        AddOnKind::RecurrentEvery,
    ] {
        let mut single = single_compact_request();
        match kind {
            AddOnKind::ExtendedExposure => {
                single.add_ons.extended_exposure = Some("exposure-plus".to_string())
            }
            AddOnKind::RecurrentAfter => {
                single.add_ons.recurrent_after = Some("rerun-after-3".to_string())
            }
            AddOnKind::RecurrentEvery => {
                single.add_ons.recurrent_every = Some("rerun-every-3".to_string())
            }
        }
        let result = quote(&single);
        assert_eq!(result.add_ons.len(), 1);
        solo_total += result.add_ons[0].subscription_cost;
    }

    let combined_total: u64 = combined
        .add_ons
        .iter()
        .map(|charge| charge.subscription_cost)
        .sum();
    assert_eq!(combined_total, solo_total);
}

#[test]
fn add_on_selection_never_moves_base_figures() {
    let bare = quote(&single_compact_request());

    let mut request = single_compact_request();
    request.add_ons.extended_exposure = Some("exposure-max".to_string());
    request.add_ons.recurrent_every = Some("rerun-every-7".to_string());
    let loaded = quote(&request);

    assert_eq!(bare.setup_fee, loaded.setup_fee);
    assert_eq!(bare.total_recurring_cost, loaded.total_recurring_cost);
}

#[test]
fn unknown_add_on_id_fails_with_configuration_error() {
    let mut request = single_compact_request();
    request.add_ons.recurrent_after = Some("rerun-after-30".to_string());

    let error = standard_service()
        .calculate_pricing(&request)
        .expect_err("id is not on the card");

    assert_eq!(
        error,
        ConfigurationError::UnknownAddOn {
            kind: AddOnKind::RecurrentAfter,
            id: "rerun-after-30".to_string(),
        }
    );
}
