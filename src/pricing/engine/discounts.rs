use super::rate_amount;
use crate::pricing::domain::{AdvertiserProfile, Discount, DiscountKind, PromotionalPack};

/// Volume tiers keyed by the advertiser's currently active adverts,
/// highest threshold first; the first match wins and tiers never stack
/// with each other.
const VOLUME_TIERS: [(u32, f64); 5] = [
    (21, 0.25),
    (11, 0.20),
    (7, 0.15),
    (4, 0.10),
    (2, 0.05),
];

/// Computes every applicable relationship discount against the same
/// pre-discount subtotal. The discounts stack additively on that base;
/// none is applied to an already-discounted remainder.
pub(crate) fn compute(
    subtotal_before_discount: u64,
    advertiser: &AdvertiserProfile,
    promotional_pack: Option<&PromotionalPack>,
) -> Vec<Discount> {
    let mut discounts = Vec::new();

    if let Some(discount) = accreditation_discount(subtotal_before_discount, advertiser) {
        discounts.push(discount);
    }
    if let Some(discount) = volume_discount(subtotal_before_discount, advertiser.active_adverts) {
        discounts.push(discount);
    }
    if let Some(discount) = promotional_discount(subtotal_before_discount, promotional_pack) {
        discounts.push(discount);
    }

    discounts
}

/// Maps a held accreditation tier to its flat percentage. Tier
/// qualification (campaign-history counts) is verified by the caller.
fn accreditation_discount(subtotal: u64, advertiser: &AdvertiserProfile) -> Option<Discount> {
    let tier = advertiser.accreditation?;
    let rate = tier.discount_rate();
    Some(Discount {
        kind: DiscountKind::Accreditation,
        name: format!("{} accreditation", tier.label()),
        rate,
        amount: rate_amount(subtotal, rate),
        detail: format!(
            "{:.0}% for {} accredited advertisers",
            rate * 100.0,
            tier.label()
        ),
    })
}

fn volume_discount(subtotal: u64, active_adverts: u32) -> Option<Discount> {
    let (threshold, rate) = VOLUME_TIERS
        .iter()
        .copied()
        .find(|(threshold, _)| active_adverts >= *threshold)?;
    Some(Discount {
        kind: DiscountKind::Volume,
        name: "Volume discount".to_string(),
        rate,
        amount: rate_amount(subtotal, rate),
        detail: format!(
            "{:.0}% for {active_adverts} active adverts (tier starts at {threshold})",
            rate * 100.0
        ),
    })
}

/// Bundle-purchase promotion with an externally agreed percentage; absent
/// packs and non-positive percentages contribute nothing.
fn promotional_discount(subtotal: u64, pack: Option<&PromotionalPack>) -> Option<Discount> {
    let pack = pack?;
    if pack.discount_rate <= 0.0 {
        return None;
    }
    Some(Discount {
        kind: DiscountKind::Promotional,
        name: format!("Promotional pack {}", pack.id),
        rate: pack.discount_rate,
        amount: rate_amount(subtotal, pack.discount_rate),
        detail: format!(
            "{:.0}% from promotional pack {}",
            pack.discount_rate * 100.0,
            pack.id
        ),
    })
}
