use super::rate_amount;
use crate::pricing::domain::{DisplaySchedule, PricingRequest};
use crate::pricing::ratecard::{ConfigurationError, RateCard};

/// Intermediate figures from the base-cost pass, consumed by the assembler
/// and (for `monthly_base_cost`) the add-on calculator.
pub(crate) struct BaseCosts {
    pub base_setup_fee: u64,
    pub monthly_display_cost: u64,
    pub size_multiplier: f64,
    pub size_fee: u64,
    pub setup_fee: u64,
    pub subscription_discount_rate: f64,
    pub subscription_discount_amount: u64,
    pub total_recurring_cost: u64,
    pub monthly_base_cost: u64,
    pub display_schedule: DisplaySchedule,
    pub frequency_label: String,
}

/// Combines setup fee, display-package price, and size multiplier into the
/// one-time setup fee and the subscription-discounted recurring cost.
///
/// The one-time and monthly figures are blended into a single base purely to
/// derive one size fee; that fee is then apportioned back to the one-time
/// component in proportion to its share of the blend. The remainder of the
/// size fee reaches billing only through `monthly_base_cost`, the percentage
/// base for add-ons. The subscription discount applies to the recurring
/// display cost only, never to the setup fee.
pub(crate) fn compute(
    card: &RateCard,
    request: &PricingRequest,
) -> Result<BaseCosts, ConfigurationError> {
    let base_setup_fee = card.setup_fee(request.category, request.display_type)?;
    let package = card.display_package(&request.package_id)?;
    let monthly_display_cost = package.price;

    let base_cost_before_size = base_setup_fee + monthly_display_cost;

    let size_multiplier = card.size_rate(request.display_type.size_mode(), request.size)?;
    let size_fee = rate_amount(base_cost_before_size, size_multiplier);

    let apportioned = (size_fee as f64 * base_setup_fee as f64 / base_cost_before_size as f64)
        .round() as u64;
    let setup_fee = base_setup_fee + apportioned;

    let subscription_discount_rate = card.subscription_discount(request.months)?;
    let gross_recurring = monthly_display_cost * u64::from(request.months);
    let subscription_discount_amount = rate_amount(gross_recurring, subscription_discount_rate);
    let total_recurring_cost = gross_recurring.saturating_sub(subscription_discount_amount);

    let monthly_base_cost = base_cost_before_size + size_fee;

    Ok(BaseCosts {
        base_setup_fee,
        monthly_display_cost,
        size_multiplier,
        size_fee,
        setup_fee,
        subscription_discount_rate,
        subscription_discount_amount,
        total_recurring_cost,
        monthly_base_cost,
        display_schedule: package.schedule,
        frequency_label: package.frequency_label.clone(),
    })
}
