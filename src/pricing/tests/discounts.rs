use super::common::*;
use crate::pricing::domain::{AccreditationTier, DiscountKind, PromotionalPack};

fn twelve_month_request() -> crate::pricing::domain::PricingRequest {
    let mut request = single_compact_request();
    request.months = 12;
    request
}

#[test]
fn volume_tier_at_eight_active_adverts_matches_the_pinned_figures() {
    let mut request = twelve_month_request();
    request.advertiser.active_adverts = 8;

    let result = quote(&request);

    assert_eq!(result.subtotal_before_discount, 138_000);
    assert_eq!(result.discounts.len(), 1);
    let discount = &result.discounts[0];
    assert_eq!(discount.kind, DiscountKind::Volume);
    assert_eq!(discount.rate, 0.15);
    assert_eq!(discount.amount, 20_700);
    assert_eq!(result.total_discount, 20_700);
    assert_eq!(result.final_amount_payable, 117_300);
}

#[test]
fn volume_tiers_are_monotonic_and_exclusive() {
    let expectations: [(u32, f64); 6] = [
        (1, 0.0),
        (2, 0.05),
        (4, 0.10),
        (7, 0.15),
        (11, 0.20),
        (21, 0.25),
    ];

    for (active_adverts, expected_rate) in expectations {
        let mut request = single_compact_request();
        request.advertiser.active_adverts = active_adverts;
        let result = quote(&request);

        let volume: Vec<_> = result
            .discounts
            .iter()
            .filter(|discount| discount.kind == DiscountKind::Volume)
            .collect();

        if expected_rate == 0.0 {
            assert!(volume.is_empty(), "{active_adverts} adverts earn no tier");
        } else {
            assert_eq!(volume.len(), 1, "exactly one tier for {active_adverts}");
            assert_eq!(volume[0].rate, expected_rate);
        }
    }
}

#[test]
fn accreditation_tiers_map_to_flat_percentages() {
    let expectations = [
        (AccreditationTier::Bronze, 0.05),
        (AccreditationTier::Silver, 0.10),
        (AccreditationTier::Gold, 0.15),
        (AccreditationTier::Platinum, 0.20),
    ];

    for (tier, expected_rate) in expectations {
        let mut request = single_compact_request();
        request.advertiser.accreditation = Some(tier);
        let result = quote(&request);

        assert_eq!(result.discounts.len(), 1);
        let discount = &result.discounts[0];
        assert_eq!(discount.kind, DiscountKind::Accreditation);
        assert_eq!(discount.rate, expected_rate);
        assert_eq!(
            discount.amount,
            (result.subtotal_before_discount as f64 * expected_rate).round() as u64
        );
    }
}

#[test]
fn stacked_discounts_share_one_base_instead_of_compounding() {
    let mut request = twelve_month_request();
    request.advertiser.accreditation = Some(AccreditationTier::Gold);
    request.advertiser.active_adverts = 8;
    request.promotional_pack = Some(PromotionalPack {
        id: "launch-week".to_string(),
        discount_rate: 0.10,
    });

    let result = quote(&request);

    // 15% + 15% + 10%, each against the same 138,000 subtotal.
    assert_eq!(result.subtotal_before_discount, 138_000);
    assert_eq!(result.discounts.len(), 3);
    for discount in &result.discounts {
        assert_eq!(
            discount.amount,
            (138_000f64 * discount.rate).round() as u64,
            "every discount prices against the undiscounted subtotal"
        );
    }
    assert_eq!(result.total_discount, 20_700 + 20_700 + 13_800);
    assert_eq!(result.final_amount_payable, 138_000 - 55_200);

    // Sequential application would land lower; pin the additive figure.
    let compounded = (138_000f64 * 0.85 * 0.85 * 0.90).round() as u64;
    assert_ne!(result.final_amount_payable, compounded);
}

#[test]
fn absent_or_non_positive_promotions_contribute_nothing() {
    let mut request = single_compact_request();
    request.promotional_pack = Some(PromotionalPack {
        id: "expired-pack".to_string(),
        discount_rate: 0.0,
    });

    let result = quote(&request);
    assert!(result.discounts.is_empty());

    request.promotional_pack = Some(PromotionalPack {
        id: "negative-pack".to_string(),
        discount_rate: -0.25,
    });
    let result = quote(&request);
    assert!(result.discounts.is_empty());
}

#[test]
fn payable_amount_clamps_at_zero_when_discounts_exceed_the_subtotal() {
    let mut request = single_compact_request();
    request.advertiser.accreditation = Some(AccreditationTier::Platinum);
    request.advertiser.active_adverts = 25;
    request.promotional_pack = Some(PromotionalPack {
        id: "full-comp".to_string(),
        discount_rate: 1.0,
    });

    let result = quote(&request);

    assert!(result.total_discount > result.subtotal_before_discount);
    assert_eq!(result.final_amount_payable, 0);
}

#[test]
fn qualifying_history_is_data_for_the_caller_not_a_gate() {
    // The engine prices whatever tier it is handed; thresholds are the
    // account component's contract.
    assert_eq!(AccreditationTier::Bronze.qualifying_history(), 50);
    assert_eq!(AccreditationTier::Silver.qualifying_history(), 100);
    assert_eq!(AccreditationTier::Gold.qualifying_history(), 250);
    assert_eq!(AccreditationTier::Platinum.qualifying_history(), 500);
}
