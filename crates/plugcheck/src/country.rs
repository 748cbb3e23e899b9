//! Country records and the alias table used to normalize raw JSON.

use serde::Serialize;
use serde_json::{Map, Value};

/// A normalized country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Country {
    pub name: String,
    /// Upper-cased ISO 3166 alpha-2 code, used as the lookup key
    pub iso2: String,
    /// Plug-type letters, upper-cased, first occurrence order
    pub plugs: Vec<String>,
    /// Mains voltage in volts, 0 when unknown
    pub voltage: f64,
    /// Frequency as display text (e.g. "50Hz"), empty when unknown
    pub freq_text: String,
}

/// Canonical fields of a country record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountryField {
    Name,
    Iso2,
    Plugs,
    Voltage,
    Frequency,
}

impl CountryField {
    /// Accepted raw field names, highest priority first.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            CountryField::Name => &["name", "country", "country_name", "countryName"],
            CountryField::Iso2 => &["iso2", "alpha2", "code"],
            CountryField::Plugs => &["plugs", "plug_types", "plugTypes", "types"],
            CountryField::Voltage => &["voltage", "voltage_v", "volts", "v"],
            CountryField::Frequency => &["frequency", "frequency_hz", "hz", "freq"],
        }
    }

    /// First alias present in `raw` with a non-empty value.
    pub fn resolve(self, raw: &Map<String, Value>) -> Option<&Value> {
        self.aliases()
            .iter()
            .filter_map(|alias| raw.get(*alias))
            .find(|value| !is_empty(value))
    }
}

/// Which fields a record must carry to be usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Required {
    /// The checker looks countries up by ISO code
    NameAndIso,
    /// Country pages are keyed by name only
    Name,
}

impl Country {
    pub fn satisfies(&self, required: Required) -> bool {
        match required {
            Required::NameAndIso => !self.name.is_empty() && !self.iso2.is_empty(),
            Required::Name => !self.name.is_empty(),
        }
    }
}

/// Build a [`Country`] from a raw record with loosely named fields.
///
/// Fields that cannot be resolved default to empty (or `0` for voltage);
/// filtering incomplete records is the caller's decision.
pub fn normalize_country(raw: &Map<String, Value>) -> Country {
    let name = CountryField::Name
        .resolve(raw)
        .map(text_of)
        .unwrap_or_default();
    let iso2 = CountryField::Iso2
        .resolve(raw)
        .map(|v| text_of(v).to_uppercase())
        .unwrap_or_default();
    let plugs = CountryField::Plugs
        .resolve(raw)
        .map(plugs_of)
        .unwrap_or_default();
    let voltage = CountryField::Voltage
        .resolve(raw)
        .map(voltage_of)
        .unwrap_or(0.0);
    let freq_text = CountryField::Frequency
        .resolve(raw)
        .map(frequency_text)
        .unwrap_or_default();

    Country {
        name,
        iso2,
        plugs,
        voltage,
        freq_text,
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(_) => false,
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn plugs_of(value: &Value) -> Vec<String> {
    let letters: Vec<String> = match value {
        Value::Array(items) => items.iter().map(text_of).collect(),
        Value::String(s) => s
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    let mut plugs: Vec<String> = Vec::with_capacity(letters.len());
    for letter in letters {
        let letter = letter.trim().to_uppercase();
        if !letter.is_empty() && !plugs.contains(&letter) {
            plugs.push(letter);
        }
    }
    plugs
}

fn voltage_of(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s
            .trim()
            .trim_end_matches(['V', 'v'])
            .trim()
            .parse::<f64>()
            .ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn frequency_text(value: &Value) -> String {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(hz) if hz > 0.0 => format!("{}Hz", n),
            _ => String::new(),
        },
        Value::String(s) => {
            let s = s.trim();
            let lower = s.to_ascii_lowercase();
            if lower.ends_with("hz") {
                format!("{}Hz", &s[..s.len() - 2])
            } else if s.ends_with(|c: char| c.is_ascii_digit()) {
                format!("{}Hz", s)
            } else {
                s.to_string()
            }
        }
        _ => String::new(),
    }
}
