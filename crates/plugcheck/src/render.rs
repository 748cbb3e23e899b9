//! Turns an evaluated trip into display text.

use crate::compat::{Evaluation, Severity, Verdict};
use crate::country::Country;
use crate::state::AppState;
use serde::Serialize;
use url::Url;

const SHOP_SEARCH_URL: &str = "https://www.amazon.com/s";
const PLACEHOLDER: &str = "—";

/// Rendering knobs that do not affect the verdict.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Affiliate tag appended to the shopping link
    pub affiliate_tag: Option<String>,
}

/// Everything shown for one evaluated trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub from: String,
    pub to: String,
    pub from_flag: String,
    pub to_flag: String,
    pub verdict: Verdict,
    pub severity: Severity,
    pub emoji: &'static str,
    pub headline: String,
    pub subtext: &'static str,
    /// e.g. "230V · 50Hz"
    pub voltage_line: String,
    pub plug_badges: Vec<String>,
    pub buy_url: Option<String>,
}

impl ResultView {
    /// Render the current selection, or `None` if it does not resolve.
    pub fn from_state(state: &AppState, options: &RenderOptions) -> Option<Self> {
        let from = state.origin()?;
        let to = state.destination()?;
        let evaluation = state.evaluate()?;
        Some(Self::build(from, to, &evaluation, options))
    }

    pub fn build(
        from: &Country,
        to: &Country,
        evaluation: &Evaluation,
        options: &RenderOptions,
    ) -> Self {
        let dest = &to.name;
        let (emoji, headline, subtext) = match evaluation.verdict {
            Verdict::Ok => (
                "✅",
                format!("No adapter needed for {dest}."),
                if evaluation.voltage_ok {
                    "Voltage compatible too — you should be good to go!"
                } else {
                    "Voltage differs, but your dual-voltage devices will work."
                },
            ),
            Verdict::AdapterOnly => (
                "🔌",
                format!("You’ll need a plug adapter for {dest}."),
                if evaluation.voltage_ok {
                    "Voltage is compatible — adapter only."
                } else {
                    "Voltage differs, but dual-voltage devices are fine — adapter only."
                },
            ),
            Verdict::VoltageWarning => (
                "⚠️",
                format!("Adapter not needed, but voltage differs in {dest}."),
                "Use a converter for single-voltage devices.",
            ),
            Verdict::BothNeeded => (
                "⛔",
                format!("You’ll need an adapter and likely a converter for {dest}."),
                "Voltage system differs and device may be single-voltage.",
            ),
        };

        Self {
            from: from.name.clone(),
            to: to.name.clone(),
            from_flag: iso_to_flag(&from.iso2),
            to_flag: iso_to_flag(&to.iso2),
            verdict: evaluation.verdict,
            severity: evaluation.verdict.severity(),
            emoji,
            headline,
            subtext,
            voltage_line: voltage_line(to),
            plug_badges: to.plugs.iter().map(|p| format!("Type {p}")).collect(),
            buy_url: buy_url(dest, options.affiliate_tag.as_deref()),
        }
    }

    /// Plain-text report for a terminal.
    pub fn to_text(&self) -> String {
        let mut out = format!(
            "{} {} → {} {}\n\n{} {}\n{}\n\n",
            self.from_flag,
            self.from,
            self.to_flag,
            self.to,
            self.emoji,
            self.headline,
            self.subtext
        );
        out.push_str(&format!("Power in {}: {}\n", self.to, self.voltage_line));
        if self.plug_badges.is_empty() {
            out.push_str(&format!("Plugs: {}\n", PLACEHOLDER));
        } else {
            out.push_str(&format!("Plugs: {}\n", self.plug_badges.join(", ")));
        }
        if let Some(url) = &self.buy_url {
            out.push_str(&format!("Shop adapters: {}\n", url));
        }
        out
    }
}

fn voltage_line(country: &Country) -> String {
    let volts = if country.voltage > 0.0 {
        country.voltage.to_string()
    } else {
        PLACEHOLDER.to_string()
    };
    let freq = if country.freq_text.is_empty() {
        PLACEHOLDER
    } else {
        country.freq_text.as_str()
    };
    format!("{volts}V · {freq}")
}

fn buy_url(destination: &str, affiliate_tag: Option<&str>) -> Option<String> {
    let mut url = Url::parse(SHOP_SEARCH_URL).ok()?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("k", &format!("travel adapter {destination}"));
        if let Some(tag) = affiliate_tag.filter(|t| !t.is_empty()) {
            query.append_pair("tag", tag);
        }
    }
    Some(url.into())
}

/// Flag emoji for an ISO 3166 alpha-2 code, `🌐` for anything else.
pub fn iso_to_flag(iso2: &str) -> String {
    const REGIONAL_A: u32 = 0x1F1E6;
    let upper = iso2.to_ascii_uppercase();
    if upper.len() != 2 || !upper.bytes().all(|b| b.is_ascii_uppercase()) {
        return "🌐".to_string();
    }
    upper
        .bytes()
        .filter_map(|b| char::from_u32(REGIONAL_A + u32::from(b - b'A')))
        .collect()
}
