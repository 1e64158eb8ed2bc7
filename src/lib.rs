//! Rating engine for advert campaign placements.
//!
//! The [`pricing`] module turns a campaign selection (placement, size,
//! display-frequency package, subscription term, add-ons, advertiser facts)
//! into an itemized [`pricing::PricingResult`] priced against the active
//! [`pricing::RateCard`] snapshot.

pub mod config;
pub mod error;
pub mod pricing;
pub mod telemetry;
