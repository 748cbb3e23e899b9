//! Static pages for the plug checker's countries.
//!
//! One page per country under `countries/`, plus `countries/index.html`
//! linking all of them. A canonical link is only emitted when a deployed base
//! URL is known.

use crate::error::Result;
use crate::output::OutputDir;
use crate::routes::{self, Route};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use plugcheck::Country;
use std::collections::HashSet;
use std::path::Path;

const BRAND: &str = "TravelPlugGuide";

const GENERATOR: &str = concat!("plugsite v", env!("CARGO_PKG_VERSION"));

const STYLE: &str = "body{font-family:system-ui,-apple-system,Segoe UI,Roboto,Inter,Arial,sans-serif;margin:24px;color:#0f172a}a{color:#0a6fae}";

const MISSING: &str = "—";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountrySummary {
    pub pages: usize,
    /// Countries whose slug was already taken by an earlier record
    pub duplicates: usize,
}

fn head(title: &str, description: &str, canonical: Option<String>) -> Markup {
    html! {
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1";
            meta name="generator" content=(GENERATOR);
            title { (title) }
            @if let Some(href) = canonical {
                link rel="canonical" href=(href);
            }
            meta name="description" content=(description);
            style { (PreEscaped(STYLE)) }
        }
    }
}

fn plug_list(country: &Country) -> String {
    if country.plugs.is_empty() {
        return MISSING.to_string();
    }
    country
        .plugs
        .iter()
        .map(|p| format!("Type {p}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn volts(country: &Country) -> String {
    if country.voltage > 0.0 {
        format!("{}V", country.voltage)
    } else {
        MISSING.to_string()
    }
}

fn frequency(country: &Country) -> &str {
    if country.freq_text.is_empty() {
        MISSING
    } else {
        &country.freq_text
    }
}

fn canonical(base_url: Option<&str>, route: &Route) -> Option<String> {
    base_url.map(|base| format!("{}{}", base.trim_end_matches('/'), route.path))
}

pub fn render_country_page(country: &Country, base_url: Option<&str>) -> String {
    let route = routes::country(&country.name);
    let plugs = plug_list(country);
    let title = format!("Plugs & Voltage in {} – {BRAND}", country.name);
    let description = format!(
        "Power plugs in {}: types {}, {}, {}. Do you need an adapter or converter?",
        country.name,
        country.plugs.join(", "),
        volts(country),
        frequency(country)
    );
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            (head(&title, &description, canonical(base_url, &route)))
            body {
                h1 { (country.name) ": plug types, voltage & frequency" }
                ul {
                    li { strong { "Plug types:" } " " (plugs) }
                    li { strong { "Voltage:" } " " (volts(country)) }
                    li { strong { "Frequency:" } " " (frequency(country)) }
                }
                p { a href="../" { "Back to checker" } }
            }
        }
    };
    markup.into_string()
}

pub fn render_country_index(countries: &[&Country], base_url: Option<&str>) -> String {
    let route = routes::country_index();
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            (head(
                &format!("Plugs & Voltage by Country – {BRAND}"),
                "Plug types, voltage and frequency for every country.",
                canonical(base_url, &route),
            ))
            body {
                h1 { "Plug types, voltage & frequency by country" }
                ul {
                    @for country in countries {
                        @let href = routes::country(&country.name).path;
                        li {
                            a href=(href.trim_start_matches("/countries/")) { (country.name) }
                            " — " (volts(country)) ", " (frequency(country))
                        }
                    }
                }
                p { a href="../" { "Back to checker" } }
            }
        }
    };
    markup.into_string()
}

/// Write every country page and the index under `out_root/countries/`.
///
/// Existing files outside the generated ones are left alone.
pub fn build_country_pages(
    countries: &[Country],
    out_root: &Path,
    base_url: Option<&str>,
) -> Result<CountrySummary> {
    let mut out = OutputDir::open(out_root)?;
    let mut summary = CountrySummary::default();
    let mut slugs = HashSet::new();
    let mut listed = Vec::with_capacity(countries.len());

    for country in countries {
        let route = routes::country(&country.name);
        if !slugs.insert(route.output.clone()) {
            diagnostics::debug!("Skipping duplicate country page {page}", page: route.output.as_str());
            summary.duplicates += 1;
            continue;
        }
        out.write(&route.output, &render_country_page(country, base_url))?;
        listed.push(country);
        summary.pages += 1;
    }

    out.write(
        &routes::country_index().output,
        &render_country_index(&listed, base_url),
    )?;
    let root = out_root.display().to_string();
    diagnostics::info!("Generated {pages} country pages under {root}", pages: summary.pages, root: root.as_str());
    Ok(summary)
}
