use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use arc_swap::ArcSwap;

use super::domain::{AdSize, AddOnKind, DisplaySchedule, DisplayType, PlacementCategory, SizeMode};

/// Raised when a request references a key the active rate card does not
/// carry. Signals a caller/rate-card mismatch, not a user-facing condition;
/// it is never retried and never suppressed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("no setup fee configured for {category:?}/{display_type:?}")]
    UnknownSetupFee {
        category: PlacementCategory,
        display_type: DisplayType,
    },
    #[error("unknown display package '{0}'")]
    UnknownDisplayPackage(String),
    #[error("no size rate configured for {mode:?}/{size:?}")]
    UnknownSizeRate { mode: SizeMode, size: AdSize },
    #[error("unknown {kind:?} add-on '{id}'")]
    UnknownAddOn { kind: AddOnKind, id: String },
    #[error("unsupported subscription term of {0} month(s)")]
    UnsupportedTerm(u32),
}

/// Purchasable display-frequency tier.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayPackage {
    pub price: u64,
    pub schedule: DisplaySchedule,
    pub frequency_label: String,
}

/// Immutable configuration snapshot the engine reads every price and
/// percentage from. Fractions are held in [0, 1] by construction
/// (`standard`) or by import-time validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RateCard {
    pub(crate) version: String,
    pub(crate) setup_fees: HashMap<(PlacementCategory, DisplayType), u64>,
    pub(crate) packages: BTreeMap<String, DisplayPackage>,
    pub(crate) size_rates: HashMap<(SizeMode, AdSize), f64>,
    pub(crate) add_on_rates: HashMap<AddOnKind, BTreeMap<String, f64>>,
    pub(crate) subscription_discounts: BTreeMap<u32, f64>,
}

impl RateCard {
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn setup_fee(
        &self,
        category: PlacementCategory,
        display_type: DisplayType,
    ) -> Result<u64, ConfigurationError> {
        self.setup_fees
            .get(&(category, display_type))
            .copied()
            .ok_or(ConfigurationError::UnknownSetupFee {
                category,
                display_type,
            })
    }

    pub fn display_package(&self, id: &str) -> Result<&DisplayPackage, ConfigurationError> {
        self.packages
            .get(id)
            .ok_or_else(|| ConfigurationError::UnknownDisplayPackage(id.to_string()))
    }

    pub fn size_rate(&self, mode: SizeMode, size: AdSize) -> Result<f64, ConfigurationError> {
        self.size_rates
            .get(&(mode, size))
            .copied()
            .ok_or(ConfigurationError::UnknownSizeRate { mode, size })
    }

    /// Rate for an optional add-on selection. An absent selection is a valid
    /// zero-contribution input, not an error; only an id missing from the
    /// table fails.
    pub fn add_on_rate(
        &self,
        kind: AddOnKind,
        id: Option<&str>,
    ) -> Result<Option<f64>, ConfigurationError> {
        let Some(id) = id else {
            return Ok(None);
        };
        self.add_on_rates
            .get(&kind)
            .and_then(|table| table.get(id))
            .copied()
            .map(Some)
            .ok_or_else(|| ConfigurationError::UnknownAddOn {
                kind,
                id: id.to_string(),
            })
    }

    pub fn subscription_discount(&self, months: u32) -> Result<f64, ConfigurationError> {
        self.subscription_discounts
            .get(&months)
            .copied()
            .ok_or(ConfigurationError::UnsupportedTerm(months))
    }

    pub fn supported_terms(&self) -> Vec<u32> {
        self.subscription_discounts.keys().copied().collect()
    }

    pub fn packages(&self) -> impl Iterator<Item = (&str, &DisplayPackage)> {
        self.packages.iter().map(|(id, pkg)| (id.as_str(), pkg))
    }

    /// Built-in default card covering every placement, display type, size,
    /// add-on family, and subscription term the platform offers.
    pub fn standard() -> Self {
        let mut setup_fees = HashMap::new();
        let fee_table: [(PlacementCategory, [u64; 3]); 4] = [
            (PlacementCategory::MainBanner, [30_000, 90_000, 150_000]),
            (PlacementCategory::SearchTop, [24_000, 72_000, 120_000]),
            (PlacementCategory::CategoryFeed, [18_000, 54_000, 90_000]),
            (PlacementCategory::DetailSidebar, [12_000, 36_000, 60_000]),
        ];
        for (category, fees) in fee_table {
            for (display_type, fee) in DisplayType::ordered().into_iter().zip(fees) {
                setup_fees.insert((category, display_type), fee);
            }
        }

        let mut packages = BTreeMap::new();
        packages.insert(
            "daily-30".to_string(),
            DisplayPackage {
                price: 10_000,
                schedule: DisplaySchedule::PerDay(30),
                frequency_label: "30 times daily".to_string(),
            },
        );
        packages.insert(
            "daily-60".to_string(),
            DisplayPackage {
                price: 18_000,
                schedule: DisplaySchedule::PerDay(60),
                frequency_label: "60 times daily".to_string(),
            },
        );
        packages.insert(
            "always-on".to_string(),
            DisplayPackage {
                price: 50_000,
                schedule: DisplaySchedule::Unlimited,
                frequency_label: "always in rotation".to_string(),
            },
        );

        let mut size_rates = HashMap::new();
        let single_rates = [0.0, 0.05, 0.10, 0.12];
        let multiple_rates = [0.0, 0.05, 0.10, 0.15];
        for (size, rate) in AdSize::ordered().into_iter().zip(single_rates) {
            size_rates.insert((SizeMode::Single, size), rate);
        }
        for (size, rate) in AdSize::ordered().into_iter().zip(multiple_rates) {
            size_rates.insert((SizeMode::Multiple, size), rate);
        }

        let mut add_on_rates = HashMap::new();
        add_on_rates.insert(
            AddOnKind::ExtendedExposure,
            BTreeMap::from([
                ("exposure-plus".to_string(), 0.10),
                ("exposure-max".to_string(), 0.20),
            ]),
        );
        add_on_rates.insert(
            AddOnKind::RecurrentAfter,
            BTreeMap::from([
                ("rerun-after-3".to_string(), 0.05),
                ("rerun-after-7".to_string(), 0.03),
            ]),
        );
        add_on_rates.insert(
            AddOnKind::RecurrentEvery,
            BTreeMap::from([
                ("rerun-every-3".to_string(), 0.08),
                ("rerun-every-7".to_string(), 0.05),
            ]),
        );

        let subscription_discounts = BTreeMap::from([
            (1, 0.0),
            (3, 0.02),
            (4, 0.03),
            (6, 0.05),
            (9, 0.07),
            (12, 0.10),
            (18, 0.13),
            (24, 0.16),
        ]);

        Self {
            version: "standard-2026.08".to_string(),
            setup_fees,
            packages,
            size_rates,
            add_on_rates,
            subscription_discounts,
        }
    }
}

/// Shared handle to the active rate card.
///
/// Replacement is a whole-snapshot atomic store; a call in flight keeps the
/// `Arc` it loaded and never observes a half-updated card.
pub struct RateCardRepository {
    card: ArcSwap<RateCard>,
}

impl RateCardRepository {
    pub fn new(card: RateCard) -> Self {
        Self {
            card: ArcSwap::from_pointee(card),
        }
    }

    pub fn current(&self) -> Arc<RateCard> {
        self.card.load_full()
    }

    pub fn install(&self, card: RateCard) {
        self.card.store(Arc::new(card));
    }
}
