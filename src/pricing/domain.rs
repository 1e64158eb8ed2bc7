use serde::{Deserialize, Serialize};

/// Placement slot a campaign is booked into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementCategory {
    MainBanner,
    SearchTop,
    CategoryFeed,
    DetailSidebar,
}

impl PlacementCategory {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::MainBanner,
            Self::SearchTop,
            Self::CategoryFeed,
            Self::DetailSidebar,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::MainBanner => "Main Banner",
            Self::SearchTop => "Search Top",
            Self::CategoryFeed => "Category Feed",
            Self::DetailSidebar => "Detail Sidebar",
        }
    }

    pub fn from_key(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "main_banner" | "main-banner" => Some(Self::MainBanner),
            "search_top" | "search-top" => Some(Self::SearchTop),
            "category_feed" | "category-feed" => Some(Self::CategoryFeed),
            "detail_sidebar" | "detail-sidebar" => Some(Self::DetailSidebar),
            _ => None,
        }
    }
}

/// Whether the slot shows one advert or rotates a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayType {
    Single,
    RollingTriple,
    RollingSix,
}

impl DisplayType {
    pub const fn ordered() -> [Self; 3] {
        [Self::Single, Self::RollingTriple, Self::RollingSix]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::RollingTriple => "Rolling (3 adverts)",
            Self::RollingSix => "Rolling (6 adverts)",
        }
    }

    /// Size multipliers are tabled separately for single and rotating slots.
    pub const fn size_mode(self) -> SizeMode {
        match self {
            Self::Single => SizeMode::Single,
            Self::RollingTriple | Self::RollingSix => SizeMode::Multiple,
        }
    }

    pub fn from_key(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "single" => Some(Self::Single),
            "rolling_triple" | "rolling-triple" => Some(Self::RollingTriple),
            "rolling_six" | "rolling-six" => Some(Self::RollingSix),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeMode {
    Single,
    Multiple,
}

impl SizeMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multiple => "multiple",
        }
    }

    pub fn from_key(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "single" => Some(Self::Single),
            "multiple" => Some(Self::Multiple),
            _ => None,
        }
    }
}

/// Physical footprint of the advert, smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdSize {
    Compact,
    Standard,
    Wide,
    Billboard,
}

impl AdSize {
    pub const fn ordered() -> [Self; 4] {
        [Self::Compact, Self::Standard, Self::Wide, Self::Billboard]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Compact => "Compact",
            Self::Standard => "Standard",
            Self::Wide => "Wide",
            Self::Billboard => "Billboard",
        }
    }

    pub fn from_key(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "standard" => Some(Self::Standard),
            "wide" => Some(Self::Wide),
            "billboard" => Some(Self::Billboard),
            _ => None,
        }
    }
}

/// Daily display promise of a frequency package.
///
/// `Unlimited` is a distinct variant rather than a large count: it only ever
/// changes the display promise text, never a monetary figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplaySchedule {
    Unlimited,
    PerDay(u32),
}

impl DisplaySchedule {
    pub fn promise(&self) -> String {
        match self {
            Self::Unlimited => "unlimited displays per day".to_string(),
            Self::PerDay(count) => format!("{count} displays per day"),
        }
    }
}

/// Optional exposure add-on families, each priced off the size-adjusted
/// monthly base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOnKind {
    ExtendedExposure,
    RecurrentAfter,
    RecurrentEvery,
}

impl AddOnKind {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::ExtendedExposure,
            Self::RecurrentAfter,
            Self::RecurrentEvery,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ExtendedExposure => "Extended Exposure",
            Self::RecurrentAfter => "Recurrent After",
            Self::RecurrentEvery => "Recurrent Every",
        }
    }

    pub fn from_key(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "extended_exposure" | "extended-exposure" => Some(Self::ExtendedExposure),
            "recurrent_after" | "recurrent-after" => Some(Self::RecurrentAfter),
            "recurrent_every" | "recurrent-every" => Some(Self::RecurrentEvery),
            _ => None,
        }
    }
}

/// Zero to three optional add-on selections, one per family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOnSelection {
    #[serde(default)]
    pub extended_exposure: Option<String>,
    #[serde(default)]
    pub recurrent_after: Option<String>,
    #[serde(default)]
    pub recurrent_every: Option<String>,
}

impl AddOnSelection {
    pub fn entries(&self) -> [(AddOnKind, Option<&str>); 3] {
        [
            (AddOnKind::ExtendedExposure, self.extended_exposure.as_deref()),
            (AddOnKind::RecurrentAfter, self.recurrent_after.as_deref()),
            (AddOnKind::RecurrentEvery, self.recurrent_every.as_deref()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.entries().iter().all(|(_, id)| id.is_none())
    }
}

/// Advertiser accreditation tier unlocking a flat relationship discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccreditationTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl AccreditationTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Platinum => "Platinum",
        }
    }

    pub const fn discount_rate(self) -> f64 {
        match self {
            Self::Bronze => 0.05,
            Self::Silver => 0.10,
            Self::Gold => 0.15,
            Self::Platinum => 0.20,
        }
    }

    /// Campaign-history count an advertiser must have reached to hold the
    /// tier. Verified upstream by the account component; the engine only maps
    /// a tier it is handed to a percentage.
    pub const fn qualifying_history(self) -> u32 {
        match self {
            Self::Bronze => 50,
            Self::Silver => 100,
            Self::Gold => 250,
            Self::Platinum => 500,
        }
    }

    pub fn from_key(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bronze" => Some(Self::Bronze),
            "silver" => Some(Self::Silver),
            "gold" => Some(Self::Gold),
            "platinum" => Some(Self::Platinum),
            _ => None,
        }
    }
}

/// Relationship facts supplied by the account/campaign-history component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvertiserProfile {
    #[serde(default)]
    pub accreditation: Option<AccreditationTier>,
    #[serde(default)]
    pub active_adverts: u32,
}

/// Bundle-purchase promotion carrying an externally agreed percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionalPack {
    pub id: String,
    pub discount_rate: f64,
}

/// One quote/purchase action, built fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    pub category: PlacementCategory,
    pub display_type: DisplayType,
    pub size: AdSize,
    pub package_id: String,
    pub months: u32,
    #[serde(default)]
    pub add_ons: AddOnSelection,
    #[serde(default)]
    pub advertiser: AdvertiserProfile,
    #[serde(default)]
    pub promotional_pack: Option<PromotionalPack>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    Accreditation,
    Volume,
    Promotional,
}

impl DiscountKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Accreditation => "Accreditation",
            Self::Volume => "Volume",
            Self::Promotional => "Promotional",
        }
    }
}

/// One applied relationship discount.
///
/// `amount` is `rate` applied to the pre-discount subtotal the discount was
/// computed against, rounded where it was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub kind: DiscountKind,
    pub name: String,
    pub rate: f64,
    pub amount: u64,
    pub detail: String,
}

/// Cost of one selected add-on over the whole subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOnCharge {
    pub kind: AddOnKind,
    pub id: String,
    pub rate: f64,
    pub monthly_cost: u64,
    pub subscription_cost: u64,
}

/// Full itemized breakdown returned by the engine.
///
/// Immutable once returned; callers that need it to survive a rate-card
/// replacement must persist it rather than recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub ratecard_version: String,
    pub base_setup_fee: u64,
    pub size_multiplier: f64,
    pub size_fee: u64,
    pub setup_fee: u64,
    pub monthly_display_cost: u64,
    pub months: u32,
    pub subscription_discount_rate: f64,
    pub subscription_discount_amount: u64,
    pub total_recurring_cost: u64,
    pub add_ons: Vec<AddOnCharge>,
    pub subtotal_before_discount: u64,
    pub discounts: Vec<Discount>,
    pub total_discount: u64,
    pub final_amount_payable: u64,
    pub display_schedule: DisplaySchedule,
    pub frequency_label: String,
}
