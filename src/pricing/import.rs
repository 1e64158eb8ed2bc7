use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{AdSize, AddOnKind, DisplaySchedule, DisplayType, PlacementCategory, SizeMode};
use super::ratecard::{DisplayPackage, RateCard};

#[derive(Debug)]
pub enum RateCardImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Invalid(String),
}

impl std::fmt::Display for RateCardImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateCardImportError::Io(err) => write!(f, "failed to read rate-card export: {}", err),
            RateCardImportError::Csv(err) => write!(f, "invalid rate-card CSV data: {}", err),
            RateCardImportError::Invalid(message) => {
                write!(f, "rate-card export rejected: {}", message)
            }
        }
    }
}

impl std::error::Error for RateCardImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RateCardImportError::Io(err) => Some(err),
            RateCardImportError::Csv(err) => Some(err),
            RateCardImportError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for RateCardImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RateCardImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// One row of the administrative rate-card export.
///
/// Columns: `table,key,amount,rate,count,label`. Which columns a row uses
/// depends on its `table`: setup fees and packages carry `amount`, packages
/// also `count` (a number or `unlimited`) and `label`; size rates, add-ons,
/// and subscription discounts carry `rate`.
#[derive(Debug, Deserialize)]
struct RateCardRow {
    table: String,
    key: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    amount: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    rate: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    count: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    label: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

pub struct RateCardImporter;

impl RateCardImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<RateCard, RateCardImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<RateCard, RateCardImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut version: Option<String> = None;
        let mut setup_fees: HashMap<(PlacementCategory, DisplayType), u64> = HashMap::new();
        let mut packages: BTreeMap<String, DisplayPackage> = BTreeMap::new();
        let mut size_rates: HashMap<(SizeMode, AdSize), f64> = HashMap::new();
        let mut add_on_rates: HashMap<AddOnKind, BTreeMap<String, f64>> = HashMap::new();
        let mut subscription_discounts: BTreeMap<u32, f64> = BTreeMap::new();

        for record in csv_reader.deserialize::<RateCardRow>() {
            let row = record?;
            match row.table.to_ascii_lowercase().as_str() {
                "version" => {
                    if version.replace(row.key.clone()).is_some() {
                        return Err(invalid("more than one version row"));
                    }
                }
                "setup_fee" => {
                    let (category, display_type) = setup_fee_key(&row.key)?;
                    let fee = required_amount(&row)?;
                    if setup_fees.insert((category, display_type), fee).is_some() {
                        return Err(duplicate("setup_fee", &row.key));
                    }
                }
                "display_package" => {
                    let package = DisplayPackage {
                        price: required_amount(&row)?,
                        schedule: schedule_from(&row)?,
                        frequency_label: row
                            .label
                            .clone()
                            .ok_or_else(|| invalid(format!("package '{}' has no label", row.key)))?,
                    };
                    if packages.insert(row.key.clone(), package).is_some() {
                        return Err(duplicate("display_package", &row.key));
                    }
                }
                "size_rate" => {
                    let (mode, size) = size_rate_key(&row.key)?;
                    let rate = required_fraction(&row)?;
                    if size_rates.insert((mode, size), rate).is_some() {
                        return Err(duplicate("size_rate", &row.key));
                    }
                }
                "add_on" => {
                    let (kind, id) = add_on_key(&row.key)?;
                    let rate = required_fraction(&row)?;
                    let table = add_on_rates.entry(kind).or_default();
                    if table.insert(id.to_string(), rate).is_some() {
                        return Err(duplicate("add_on", &row.key));
                    }
                }
                "subscription_discount" => {
                    let months: u32 = row
                        .key
                        .parse()
                        .map_err(|_| invalid(format!("bad month count '{}'", row.key)))?;
                    let rate = required_fraction(&row)?;
                    if subscription_discounts.insert(months, rate).is_some() {
                        return Err(duplicate("subscription_discount", &row.key));
                    }
                }
                other => return Err(invalid(format!("unknown table '{other}'"))),
            }
        }

        let version = version.ok_or_else(|| invalid("missing version row"))?;

        Ok(RateCard {
            version,
            setup_fees,
            packages,
            size_rates,
            add_on_rates,
            subscription_discounts,
        })
    }
}

fn invalid(message: impl Into<String>) -> RateCardImportError {
    RateCardImportError::Invalid(message.into())
}

fn duplicate(table: &str, key: &str) -> RateCardImportError {
    invalid(format!("duplicate {table} row for '{key}'"))
}

fn split_key<'a>(table: &str, key: &'a str) -> Result<(&'a str, &'a str), RateCardImportError> {
    key.split_once('/')
        .ok_or_else(|| invalid(format!("{table} key '{key}' is not 'left/right'")))
}

fn setup_fee_key(key: &str) -> Result<(PlacementCategory, DisplayType), RateCardImportError> {
    let (category, display_type) = split_key("setup_fee", key)?;
    Ok((
        PlacementCategory::from_key(category)
            .ok_or_else(|| invalid(format!("unknown placement category '{category}'")))?,
        DisplayType::from_key(display_type)
            .ok_or_else(|| invalid(format!("unknown display type '{display_type}'")))?,
    ))
}

fn size_rate_key(key: &str) -> Result<(SizeMode, AdSize), RateCardImportError> {
    let (mode, size) = split_key("size_rate", key)?;
    Ok((
        SizeMode::from_key(mode).ok_or_else(|| invalid(format!("unknown size mode '{mode}'")))?,
        AdSize::from_key(size).ok_or_else(|| invalid(format!("unknown ad size '{size}'")))?,
    ))
}

fn add_on_key(key: &str) -> Result<(AddOnKind, &str), RateCardImportError> {
    let (kind, id) = split_key("add_on", key)?;
    Ok((
        AddOnKind::from_key(kind)
            .ok_or_else(|| invalid(format!("unknown add-on kind '{kind}'")))?,
        id,
    ))
}

fn required_amount(row: &RateCardRow) -> Result<u64, RateCardImportError> {
    let raw = row
        .amount
        .as_deref()
        .ok_or_else(|| invalid(format!("{} '{}' has no amount", row.table, row.key)))?;
    raw.parse()
        .map_err(|_| invalid(format!("bad amount '{raw}' for '{}'", row.key)))
}

fn required_fraction(row: &RateCardRow) -> Result<f64, RateCardImportError> {
    let raw = row
        .rate
        .as_deref()
        .ok_or_else(|| invalid(format!("{} '{}' has no rate", row.table, row.key)))?;
    let rate: f64 = raw
        .parse()
        .map_err(|_| invalid(format!("bad rate '{raw}' for '{}'", row.key)))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(invalid(format!(
            "rate {rate} for '{}' is outside [0, 1]",
            row.key
        )));
    }
    Ok(rate)
}

fn schedule_from(row: &RateCardRow) -> Result<DisplaySchedule, RateCardImportError> {
    let raw = row
        .count
        .as_deref()
        .ok_or_else(|| invalid(format!("package '{}' has no display count", row.key)))?;
    if raw.eq_ignore_ascii_case("unlimited") {
        return Ok(DisplaySchedule::Unlimited);
    }
    let count: u32 = raw
        .parse()
        .map_err(|_| invalid(format!("bad display count '{raw}' for '{}'", row.key)))?;
    Ok(DisplaySchedule::PerDay(count))
}
