//! Checker state and its transitions.

use crate::compat::{Device, Evaluation, evaluate};
use crate::country::Country;
use std::collections::BTreeMap;

/// Everything the checker needs to produce a result.
///
/// `AppState` is a plain value: [`AppState::apply`] consumes it and returns
/// the next state, and rendering reads it without side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    countries: Vec<Country>,
    by_iso: BTreeMap<String, usize>,
    selected_from: Option<String>,
    selected_to: Option<String>,
    device: Device,
}

/// A user input that changes the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Home country, by ISO code or name
    SelectFrom(String),
    /// Destination country, by ISO code or name
    SelectTo(String),
    SetDual(bool),
    SetDeviceLabel(String),
}

impl AppState {
    /// State with no selection. The last record wins for duplicate codes.
    pub fn new(countries: Vec<Country>) -> Self {
        let mut by_iso = BTreeMap::new();
        for (index, country) in countries.iter().enumerate() {
            by_iso.insert(country.iso2.clone(), index);
        }
        Self {
            countries,
            by_iso,
            selected_from: None,
            selected_to: None,
            device: Device::default(),
        }
    }

    /// State with the default trip selected.
    ///
    /// Home: the locale's region if known, else GB, else the first country.
    /// Destination: JP, else the first country that is not home.
    pub fn with_defaults(countries: Vec<Country>, locale: Option<&str>) -> Self {
        let mut state = Self::new(countries);
        let Some(first) = state.countries.first().map(|c| c.iso2.clone()) else {
            return state;
        };

        let from = locale
            .and_then(region_from_locale)
            .filter(|region| state.by_iso.contains_key(region))
            .or_else(|| state.by_iso.contains_key("GB").then(|| "GB".to_string()))
            .unwrap_or_else(|| first.clone());

        let to = if state.by_iso.contains_key("JP") {
            "JP".to_string()
        } else {
            state
                .countries
                .iter()
                .find(|c| c.iso2 != from)
                .map(|c| c.iso2.clone())
                .unwrap_or(first)
        };

        state.selected_from = Some(from);
        state.selected_to = Some(to);
        state
    }

    pub fn apply(mut self, action: Action) -> Self {
        match action {
            Action::SelectFrom(query) => self.selected_from = Some(self.resolve_key(&query)),
            Action::SelectTo(query) => self.selected_to = Some(self.resolve_key(&query)),
            Action::SetDual(dual) => self.device.dual_toggle = dual,
            Action::SetDeviceLabel(label) => self.device.label = label,
        }
        self
    }

    /// Lookup key for a query; unknown queries are kept upper-cased so the
    /// selection simply fails to resolve.
    fn resolve_key(&self, query: &str) -> String {
        self.resolve(query)
            .map(|c| c.iso2.clone())
            .unwrap_or_else(|| query.trim().to_uppercase())
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn lookup(&self, iso2: &str) -> Option<&Country> {
        self.by_iso
            .get(iso2)
            .and_then(|&index| self.countries.get(index))
    }

    /// Find a country by ISO code or by name, ignoring case.
    pub fn resolve(&self, query: &str) -> Option<&Country> {
        let query = query.trim();
        self.lookup(&query.to_uppercase()).or_else(|| {
            self.countries
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(query))
        })
    }

    pub fn selected_from(&self) -> Option<&str> {
        self.selected_from.as_deref()
    }

    pub fn selected_to(&self) -> Option<&str> {
        self.selected_to.as_deref()
    }

    pub fn origin(&self) -> Option<&Country> {
        self.selected_from.as_deref().and_then(|iso| self.lookup(iso))
    }

    pub fn destination(&self) -> Option<&Country> {
        self.selected_to.as_deref().and_then(|iso| self.lookup(iso))
    }

    /// `None` until both selections resolve to known countries.
    pub fn evaluate(&self) -> Option<Evaluation> {
        Some(evaluate(self.origin()?, self.destination()?, &self.device))
    }
}

/// Region part of a locale tag: `en-GB`, `en_GB.UTF-8` → `GB`.
pub fn region_from_locale(locale: &str) -> Option<String> {
    let tag = locale.split(['.', '@']).next()?;
    let region = tag.split(['-', '_']).nth(1)?;
    let region = region.trim().to_uppercase();
    (region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic())).then_some(region)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::Verdict;

    fn country(name: &str, iso2: &str, plugs: &[&str], voltage: f64) -> Country {
        Country {
            name: name.to_string(),
            iso2: iso2.to_string(),
            plugs: plugs.iter().map(|p| p.to_string()).collect(),
            voltage,
            freq_text: "50Hz".to_string(),
        }
    }

    fn dataset() -> Vec<Country> {
        vec![
            country("France", "FR", &["C", "E"], 230.0),
            country("United Kingdom", "GB", &["G"], 230.0),
            country("Japan", "JP", &["A", "B"], 100.0),
            country("United States", "US", &["A", "B"], 120.0),
        ]
    }

    #[test]
    fn test_region_from_locale() {
        assert_eq!(region_from_locale("en-GB"), Some("GB".to_string()));
        assert_eq!(region_from_locale("en_us.UTF-8"), Some("US".to_string()));
        assert_eq!(region_from_locale("de_DE@euro"), Some("DE".to_string()));
        assert_eq!(region_from_locale("C"), None);
        assert_eq!(region_from_locale("zh-Hant-TW"), None);
    }

    #[test]
    fn test_defaults() {
        let state = AppState::with_defaults(dataset(), Some("en_US.UTF-8"));
        assert_eq!(state.selected_from(), Some("US"));
        assert_eq!(state.selected_to(), Some("JP"));

        let state = AppState::with_defaults(dataset(), Some("xx-ZZ"));
        assert_eq!(state.selected_from(), Some("GB"));

        let no_gb_no_jp = vec![
            country("France", "FR", &["C"], 230.0),
            country("Peru", "PE", &["A", "C"], 220.0),
        ];
        let state = AppState::with_defaults(no_gb_no_jp, None);
        assert_eq!(state.selected_from(), Some("FR"));
        assert_eq!(state.selected_to(), Some("PE"));

        let state = AppState::with_defaults(vec![], None);
        assert_eq!(state.evaluate(), None);
    }

    #[test]
    fn test_transitions() {
        let state = AppState::new(dataset())
            .apply(Action::SelectFrom("gb".to_string()))
            .apply(Action::SelectTo("japan".to_string()));
        assert_eq!(state.selected_to(), Some("JP"));
        assert_eq!(state.evaluate().map(|e| e.verdict), Some(Verdict::BothNeeded));

        let state = state.apply(Action::SetDual(true));
        assert_eq!(state.evaluate().map(|e| e.verdict), Some(Verdict::AdapterOnly));

        let state = state.apply(Action::SetDeviceLabel("120V".to_string()));
        assert_eq!(state.evaluate().map(|e| e.verdict), Some(Verdict::BothNeeded));
    }

    #[test]
    fn test_unknown_selection_skips_evaluation() {
        let state = AppState::new(dataset())
            .apply(Action::SelectFrom("GB".to_string()))
            .apply(Action::SelectTo("Atlantis".to_string()));
        assert_eq!(state.selected_to(), Some("ATLANTIS"));
        assert!(state.destination().is_none());
        assert!(state.evaluate().is_none());
    }

    #[test]
    fn test_duplicate_iso_last_wins() {
        let mut countries = dataset();
        countries.push(country("Great Britain", "GB", &["C"], 230.0));
        let state = AppState::new(countries)
            .apply(Action::SelectFrom("GB".to_string()))
            .apply(Action::SelectTo("FR".to_string()));
        assert_eq!(state.lookup("GB").map(|c| c.name.as_str()), Some("Great Britain"));
        // The later record is the one evaluated: type C fits France
        assert_eq!(state.evaluate().map(|e| e.verdict), Some(Verdict::Ok));
        // Both records are still listed
        assert_eq!(state.countries().len(), 5);
    }
}
