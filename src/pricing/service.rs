use std::sync::Arc;

use super::domain::{PricingRequest, PricingResult};
use super::engine;
use super::ratecard::{ConfigurationError, RateCard, RateCardRepository};

/// Service binding the engine to the active rate-card snapshot.
pub struct PricingService {
    ratecard: Arc<RateCardRepository>,
}

impl PricingService {
    pub fn new(ratecard: Arc<RateCardRepository>) -> Self {
        Self { ratecard }
    }

    pub fn with_standard_card() -> Self {
        Self::new(Arc::new(RateCardRepository::new(RateCard::standard())))
    }

    /// The single pricing entry point: a pure function of the current rate
    /// card and the request. Two identical requests differ only if the card
    /// was replaced between them.
    pub fn calculate_pricing(
        &self,
        request: &PricingRequest,
    ) -> Result<PricingResult, ConfigurationError> {
        // One snapshot load per call; the card cannot change underneath the
        // computation.
        let card = self.ratecard.current();
        engine::calculate(&card, request)
    }

    /// Atomically replaces the active rate card.
    pub fn install_ratecard(&self, card: RateCard) {
        self.ratecard.install(card);
    }

    pub fn current_ratecard(&self) -> Arc<RateCard> {
        self.ratecard.current()
    }
}
