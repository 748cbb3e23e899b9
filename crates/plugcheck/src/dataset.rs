//! Dataset loading.
//!
//! A dataset is a JSON document that is either an array of records or an
//! object keyed by record name. Both shapes are normalized to a list of JSON
//! objects before any typed conversion happens.

use crate::country::{Country, Required, normalize_country};
use crate::error::{DatasetError, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Where a dataset document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(String),
}

impl Source {
    /// `http://` and `https://` locations are fetched, anything else is a path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Source::Url(location.to_string())
        } else {
            Source::Path(PathBuf::from(location))
        }
    }

    pub fn read_to_string(&self) -> Result<String> {
        match self {
            Source::Path(path) => read_file(path),
            Source::Url(url) => fetch(url),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Path(path) => write!(f, "{}", path.display()),
            Source::Url(url) => write!(f, "{}", url),
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn fetch(url: &str) -> Result<String> {
    let fetch_err = |source| DatasetError::Fetch {
        url: url.to_string(),
        source,
    };
    let response = reqwest::blocking::get(url).map_err(fetch_err)?;
    let status = response.status();
    if !status.is_success() {
        return Err(DatasetError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    response.text().map_err(fetch_err)
}

/// Parse a document and flatten it to a list of records.
///
/// For object-shaped documents each key is injected as `key_field`, unless
/// the record already has that field. Entries that are not objects are
/// dropped.
pub fn records(document: &str, key_field: &str) -> Result<Vec<Map<String, Value>>> {
    let value: Value = serde_json::from_str(document)?;
    let records: Vec<Map<String, Value>> = match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        Value::Object(entries) => entries
            .into_iter()
            .filter_map(|(key, item)| match item {
                Value::Object(mut map) => {
                    if !map.contains_key(key_field) {
                        map.insert(key_field.to_string(), Value::String(key));
                    }
                    Some(map)
                }
                _ => None,
            })
            .collect(),
        other => return Err(DatasetError::UnsupportedShape(shape_name(&other))),
    };
    Ok(records)
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Convert every record with `convert`, dropping the ones it rejects.
///
/// Fails with [`DatasetError::NoUsableRecords`] when nothing survives, so
/// an unrecognized document never looks like an empty but valid one.
pub fn collect_usable<T>(
    records: Vec<Map<String, Value>>,
    convert: impl Fn(&Map<String, Value>) -> Option<T>,
) -> Result<Vec<T>> {
    let total = records.len();
    let usable: Vec<T> = records.iter().filter_map(&convert).collect();
    let dropped = total - usable.len();
    if dropped > 0 {
        diagnostics::debug!("Dropped {dropped} of {total} records with missing required fields", dropped: dropped, total: total);
    }
    if usable.is_empty() {
        return Err(DatasetError::NoUsableRecords { total });
    }
    Ok(usable)
}

/// Normalize a country document, keeping records that satisfy `required`.
pub fn countries_from_str(document: &str, required: Required) -> Result<Vec<Country>> {
    let raw = records(document, "name")?;
    collect_usable(raw, |record| {
        let country = normalize_country(record);
        country.satisfies(required).then_some(country)
    })
}

/// Read and normalize a country dataset.
pub fn load_countries(source: &Source, required: Required) -> Result<Vec<Country>> {
    let document = source.read_to_string()?;
    let countries = countries_from_str(&document, required)?;
    let location = source.to_string();
    diagnostics::info!("Loaded {count} countries from {location}", count: countries.len(), location: location.as_str());
    Ok(countries)
}
