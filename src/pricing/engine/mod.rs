mod addons;
mod base;
mod discounts;

use super::domain::{PricingRequest, PricingResult};
use super::ratecard::{ConfigurationError, RateCard};

/// A percentage applied to a monetary base, rounded to the nearest unit at
/// the step that produces it. Rounding is never redistributed later.
pub(crate) fn rate_amount(base: u64, rate: f64) -> u64 {
    (base as f64 * rate).round() as u64
}

/// Sequences the base, add-on, and discount calculators into one immutable
/// result. Fails with `ConfigurationError` before producing any partial
/// output.
pub(crate) fn calculate(
    card: &RateCard,
    request: &PricingRequest,
) -> Result<PricingResult, ConfigurationError> {
    let base = base::compute(card, request)?;
    let add_ons = addons::compute(card, base.monthly_base_cost, request.months, &request.add_ons)?;
    let add_on_total: u64 = add_ons.iter().map(|charge| charge.subscription_cost).sum();

    let subtotal_before_discount = base.setup_fee + base.total_recurring_cost + add_on_total;

    let discounts = discounts::compute(
        subtotal_before_discount,
        &request.advertiser,
        request.promotional_pack.as_ref(),
    );
    // Each discount was computed against the same pre-discount subtotal;
    // the total is their plain sum, never a compounded remainder.
    let total_discount: u64 = discounts.iter().map(|discount| discount.amount).sum();
    let final_amount_payable = subtotal_before_discount.saturating_sub(total_discount);

    Ok(PricingResult {
        ratecard_version: card.version().to_string(),
        base_setup_fee: base.base_setup_fee,
        size_multiplier: base.size_multiplier,
        size_fee: base.size_fee,
        setup_fee: base.setup_fee,
        monthly_display_cost: base.monthly_display_cost,
        months: request.months,
        subscription_discount_rate: base.subscription_discount_rate,
        subscription_discount_amount: base.subscription_discount_amount,
        total_recurring_cost: base.total_recurring_cost,
        add_ons,
        subtotal_before_discount,
        discounts,
        total_discount,
        final_amount_payable,
        display_schedule: base.display_schedule,
        frequency_label: base.frequency_label,
    })
}
