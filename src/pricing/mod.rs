//! Campaign pricing assembled into one itemized quote from rate-card
//! lookups, the base and add-on cost calculators, and the discount rules.
//!
//! The computation is synchronous and pure with respect to the active
//! [`RateCard`] snapshot; concurrent callers share nothing but that
//! snapshot.

pub mod domain;
mod engine;
pub mod import;
pub mod ratecard;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AccreditationTier, AdSize, AddOnCharge, AddOnKind, AddOnSelection, AdvertiserProfile,
    Discount, DiscountKind, DisplaySchedule, DisplayType, PlacementCategory, PricingRequest,
    PricingResult, PromotionalPack, SizeMode,
};
pub use import::{RateCardImportError, RateCardImporter};
pub use ratecard::{ConfigurationError, DisplayPackage, RateCard, RateCardRepository};
pub use router::pricing_router;
pub use service::PricingService;
