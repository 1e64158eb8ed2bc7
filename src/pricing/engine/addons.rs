use super::rate_amount;
use crate::pricing::domain::{AddOnCharge, AddOnSelection};
use crate::pricing::ratecard::{ConfigurationError, RateCard};

/// Prices each selected add-on off the size-adjusted monthly base.
///
/// The three families are mutually independent and purely additive; an
/// absent selection contributes nothing.
pub(crate) fn compute(
    card: &RateCard,
    monthly_base_cost: u64,
    months: u32,
    selection: &AddOnSelection,
) -> Result<Vec<AddOnCharge>, ConfigurationError> {
    let mut charges = Vec::new();

    for (kind, selected) in selection.entries() {
        let (Some(id), Some(rate)) = (selected, card.add_on_rate(kind, selected)?) else {
            continue;
        };
        let monthly_cost = rate_amount(monthly_base_cost, rate);
        charges.push(AddOnCharge {
            kind,
            id: id.to_string(),
            rate,
            monthly_cost,
            subscription_cost: monthly_cost * u64::from(months),
        });
    }

    Ok(charges)
}
