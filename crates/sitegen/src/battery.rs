//! Battery records from `data/batteries.json`.

use crate::error::{Result, SiteError};
use plugcheck::dataset::{collect_usable, records};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battery {
    #[serde(deserialize_with = "text")]
    pub code: String,
    #[serde(default, deserialize_with = "list")]
    pub names: Vec<String>,
    #[serde(default)]
    pub chemistry: Option<String>,
    /// Nominal voltage as printed, e.g. "3V" or "1.55"
    #[serde(default, deserialize_with = "optional_text")]
    pub voltage: Option<String>,
    #[serde(default)]
    pub diameter_mm: Option<f64>,
    #[serde(default)]
    pub height_mm: Option<f64>,
    #[serde(default, deserialize_with = "list")]
    pub common_uses: Vec<String>,
    /// Codes of batteries to compare against; not validated
    #[serde(default, deserialize_with = "list")]
    pub compare_with: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Vendor name to product URL
    #[serde(default)]
    pub affiliate: BTreeMap<String, String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl From<TextOrNumber> for String {
    fn from(value: TextOrNumber) -> Self {
        match value {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Number(number) => number.to_string(),
        }
    }
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    TextOrNumber::deserialize(deserializer).map(String::from)
}

fn optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    Ok(Option::<TextOrNumber>::deserialize(deserializer)?.map(String::from))
}

/// A list that may also be `null`.
fn list<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<TextOrNumber>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(String::from)
        .collect())
}

impl Battery {
    /// Codes become directory names, so they must be a single path segment.
    pub fn has_path_safe_code(&self) -> bool {
        let code = self.code.trim();
        !code.is_empty()
            && code != "."
            && code != ".."
            && !code.contains(['/', '\\'])
            && !code.chars().any(char::is_control)
    }
}

fn battery_from_record(record: &Map<String, Value>) -> Option<Battery> {
    let battery: Battery = serde_json::from_value(Value::Object(record.clone())).ok()?;
    (!battery.code.trim().is_empty()).then_some(battery)
}

/// Parse a battery document: an array, or an object keyed by code.
///
/// Records that fail to parse are dropped; a duplicated code keeps its first
/// record. A code that cannot be a directory name fails the whole load.
pub fn batteries_from_str(document: &str) -> Result<Vec<Battery>> {
    let parsed = collect_usable(records(document, "code")?, battery_from_record)?;

    let mut seen = HashSet::new();
    let mut batteries = Vec::with_capacity(parsed.len());
    for battery in parsed {
        if !battery.has_path_safe_code() {
            return Err(SiteError::UnsafeCode { code: battery.code });
        }
        if !seen.insert(battery.code.clone()) {
            diagnostics::warn!("Duplicate battery code {code}, keeping the first record", code: battery.code.as_str());
            continue;
        }
        batteries.push(battery);
    }
    Ok(batteries)
}

pub fn load_batteries(path: &Path) -> Result<Vec<Battery>> {
    let document = std::fs::read_to_string(path).map_err(|source| SiteError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let batteries = batteries_from_str(&document)?;
    let location = path.display().to_string();
    diagnostics::info!("Loaded {count} batteries from {location}", count: batteries.len(), location: location.as_str());
    Ok(batteries)
}
