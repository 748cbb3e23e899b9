//! URL paths and output locations for generated pages.
//!
//! Every generated page has a site path (`/battery/CR2032/`) and an output
//! file relative to the dist directory (`battery/CR2032/index.html`).

use crate::battery::Battery;
use std::collections::{BTreeSet, HashSet};

/// Where one page lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Site path with leading and trailing `/`
    pub path: String,
    /// File path relative to the output root
    pub output: String,
}

impl Route {
    /// Directory-style route: `segments` joined under `/`, served from `index.html`.
    pub fn dir(segments: &[&str]) -> Self {
        if segments.is_empty() {
            return Self {
                path: "/".to_string(),
                output: "index.html".to_string(),
            };
        }
        let joined = segments.join("/");
        Self {
            path: format!("/{joined}/"),
            output: format!("{joined}/index.html"),
        }
    }
}

pub fn home() -> Route {
    Route::dir(&[])
}

pub fn search() -> Route {
    Route::dir(&["search"])
}

pub fn guide(slug: &str) -> Route {
    Route::dir(&["guides", slug])
}

pub fn category(slug: &str) -> Route {
    Route::dir(&["category", slug])
}

/// Page for one battery; the code is percent-encoded in the site path only.
pub fn battery(code: &str) -> Route {
    Route {
        path: format!("/battery/{}/", encode_segment(code)),
        output: format!("battery/{code}/index.html"),
    }
}

/// Percent-encode one path segment, with spaces as `%20` rather than `+`.
fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// An unordered pair of batteries, stored with the codes sorted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComparePair {
    pub a: String,
    pub b: String,
}

impl ComparePair {
    /// `None` for a battery compared with itself.
    pub fn new(x: &str, y: &str) -> Option<Self> {
        if x == y {
            return None;
        }
        let (a, b) = if x < y { (x, y) } else { (y, x) };
        Some(Self {
            a: a.to_string(),
            b: b.to_string(),
        })
    }

    /// `cr2032-vs-lr44`
    pub fn slug(&self) -> String {
        format!("{}-vs-{}", self.a, self.b).to_lowercase()
    }

    pub fn route(&self) -> Route {
        Route::dir(&["compare", &self.slug()])
    }
}

/// Compare pairs whose two batteries both exist, deduplicated and sorted.
///
/// Also returns how many references were skipped because they point at
/// the battery itself or at an unknown code.
pub fn compare_pairs(batteries: &[Battery]) -> (Vec<ComparePair>, usize) {
    let known: HashSet<&str> = batteries.iter().map(|b| b.code.as_str()).collect();
    let mut pairs = BTreeSet::new();
    let mut skipped = 0;
    for battery in batteries {
        for other in &battery.compare_with {
            if !known.contains(other.as_str()) {
                diagnostics::debug!(
                    "Skipping comparison of {code} with unknown battery {other}",
                    code: battery.code.as_str(),
                    other: other.as_str()
                );
                skipped += 1;
                continue;
            }
            match ComparePair::new(&battery.code, other) {
                Some(pair) => {
                    pairs.insert(pair);
                }
                None => skipped += 1,
            }
        }
    }
    (pairs.into_iter().collect(), skipped)
}

/// Slug of the country listing, `countries/index.html`.
const INDEX_SLUG: &str = "index";

/// File-name slug for a country: lower-cased, whitespace runs become `-`.
///
/// Path separators also become `-` so the page stays inside `countries/`,
/// and a country named "Index" gets `index-country` so it cannot replace the
/// listing page.
pub fn country_slug(name: &str) -> String {
    let slug = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
        .replace(['/', '\\'], "-");
    if slug == INDEX_SLUG {
        format!("{INDEX_SLUG}-country")
    } else {
        slug
    }
}

/// Page for one country, percent-encoded for use in links.
pub fn country(name: &str) -> Route {
    let slug = country_slug(name);
    Route {
        path: format!("/countries/{}.html", encode_segment(&slug)),
        output: format!("countries/{slug}.html"),
    }
}

pub fn country_index() -> Route {
    Route::dir(&["countries"])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn battery_record(code: &str, compare_with: &[&str]) -> Battery {
        Battery {
            code: code.to_string(),
            names: vec![],
            chemistry: None,
            voltage: None,
            diameter_mm: None,
            height_mm: None,
            common_uses: vec![],
            compare_with: compare_with.iter().map(|c| c.to_string()).collect(),
            notes: None,
            affiliate: Default::default(),
        }
    }

    #[test]
    fn test_dir_routes() {
        assert_eq!(home().path, "/");
        assert_eq!(home().output, "index.html");
        assert_eq!(search().output, "search/index.html");
        assert_eq!(guide("about").path, "/guides/about/");
        assert_eq!(battery("CR2032").output, "battery/CR2032/index.html");
        assert_eq!(battery("CR2032").path, "/battery/CR2032/");
    }

    #[test]
    fn test_battery_path_is_encoded() {
        let route = battery("A 76#1?");
        assert_eq!(route.path, "/battery/A%2076%231%3F/");
        assert_eq!(route.output, "battery/A 76#1?/index.html");
    }

    #[test]
    fn test_pair_is_canonical() {
        let ab = ComparePair::new("CR2032", "LR44").expect("distinct");
        let ba = ComparePair::new("LR44", "CR2032").expect("distinct");
        assert_eq!(ab, ba);
        assert_eq!(ab.route().output, "compare/cr2032-vs-lr44/index.html");
        assert_eq!(ab.route().path, "/compare/cr2032-vs-lr44/");
        assert!(ComparePair::new("LR44", "LR44").is_none());
    }

    #[test]
    fn test_compare_pairs_dedup_and_skip() {
        let batteries = vec![
            battery_record("CR2032", &["LR44", "CR2032", "CR9999"]),
            battery_record("LR44", &["CR2032"]),
        ];
        let (pairs, skipped) = compare_pairs(&batteries);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].slug(), "cr2032-vs-lr44");
        assert_eq!(skipped, 2);
    }

    #[test]
    fn test_country_routes() {
        assert_eq!(country_slug("United  Kingdom"), "united-kingdom");
        assert_eq!(country_slug(" Saint Kitts/Nevis "), "saint-kitts-nevis");
        let route = country("Côte d'Ivoire");
        assert_eq!(route.output, "countries/côte-d'ivoire.html");
        assert_eq!(route.path, "/countries/c%C3%B4te-d%27ivoire.html");
        assert_eq!(country_index().path, "/countries/");
    }

    #[test]
    fn test_country_named_index_keeps_its_own_page() {
        assert_eq!(country_slug(" INDEX "), "index-country");
        assert_eq!(country("Index").output, "countries/index-country.html");
        assert_ne!(country("Index").output, country_index().output);
        assert_eq!(country_slug("Index Islands"), "index-islands");
    }
}
