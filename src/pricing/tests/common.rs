use crate::pricing::domain::{
    AdSize, AddOnSelection, AdvertiserProfile, DisplayType, PlacementCategory, PricingRequest,
    PricingResult,
};
use crate::pricing::service::PricingService;

pub(super) fn standard_service() -> PricingService {
    PricingService::with_standard_card()
}

/// Single display in the cheapest slot: Main Banner, smallest size, the
/// 10,000/month package, one month, no add-ons, no relationship facts.
pub(super) fn single_compact_request() -> PricingRequest {
    PricingRequest {
        category: PlacementCategory::MainBanner,
        display_type: DisplayType::Single,
        size: AdSize::Compact,
        package_id: "daily-30".to_string(),
        months: 1,
        add_ons: AddOnSelection::default(),
        advertiser: AdvertiserProfile::default(),
        promotional_pack: None,
    }
}

/// Three-advert rolling Main Banner at the largest size with the unlimited
/// 50,000/month package.
pub(super) fn rolling_billboard_request() -> PricingRequest {
    PricingRequest {
        category: PlacementCategory::MainBanner,
        display_type: DisplayType::RollingTriple,
        size: AdSize::Billboard,
        package_id: "always-on".to_string(),
        months: 1,
        add_ons: AddOnSelection::default(),
        advertiser: AdvertiserProfile::default(),
        promotional_pack: None,
    }
}

pub(super) fn quote(request: &PricingRequest) -> PricingResult {
    standard_service()
        .calculate_pricing(request)
        .expect("standard card prices the request")
}
