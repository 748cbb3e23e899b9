use crate::error_utils::{DATASET_UNAVAILABLE, ErrorContext};
use anyhow::{Result, anyhow};
use clap::Args;
use plugcheck::dataset::Source;
use plugcheck::{Action, AppState, RenderOptions, Required, ResultView, iso_to_flag, load_countries};

#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Country dataset: a file path or an http(s) URL
    #[arg(long, default_value = "data.json")]
    pub data: String,

    /// Home country, by ISO code or name (default: from the locale, else GB)
    #[arg(long)]
    pub from: Option<String>,

    /// Destination country, by ISO code or name (default: JP)
    #[arg(long)]
    pub to: Option<String>,

    /// The device accepts 100-240V
    #[arg(long)]
    pub dual: bool,

    /// Voltage label printed on the device, e.g. "INPUT: 100-240V"
    #[arg(long)]
    pub label: Option<String>,

    /// Affiliate tag for the adapter shopping link
    #[arg(long)]
    pub affiliate_tag: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// List the known countries instead of checking a trip
    #[arg(long)]
    pub list: bool,
}

impl Default for CheckArgs {
    fn default() -> Self {
        Self {
            data: "data.json".to_string(),
            from: None,
            to: None,
            dual: false,
            label: None,
            affiliate_tag: None,
            json: false,
            list: false,
        }
    }
}

/// Locale used to guess the home country: `LC_ALL`, then `LANG`.
pub fn locale_from_env() -> Option<String> {
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.trim().is_empty())
}

/// Check one trip and hand the rendered result to `handler`.
pub fn check_command<F>(args: &CheckArgs, locale: Option<&str>, mut handler: F) -> Result<()>
where
    F: FnMut(&str),
{
    let source = Source::parse(&args.data);
    let countries =
        load_countries(&source, Required::NameAndIso).with_context_msg(DATASET_UNAVAILABLE)?;

    let mut state = AppState::with_defaults(countries, locale);
    if args.list {
        for country in state.countries() {
            handler(&format!("{} {}  {}", iso_to_flag(&country.iso2), country.iso2, country.name));
        }
        return Ok(());
    }

    if let Some(from) = &args.from {
        state = state.apply(Action::SelectFrom(from.clone()));
    }
    if let Some(to) = &args.to {
        state = state.apply(Action::SelectTo(to.clone()));
    }
    state = state.apply(Action::SetDual(args.dual));
    if let Some(label) = &args.label {
        state = state.apply(Action::SetDeviceLabel(label.clone()));
    }

    if state.origin().is_none() {
        return Err(anyhow!("Unknown home country: {}", args.from.as_deref().unwrap_or("")));
    }
    if state.destination().is_none() {
        return Err(anyhow!("Unknown destination country: {}", args.to.as_deref().unwrap_or("")));
    }

    let options = RenderOptions {
        affiliate_tag: args.affiliate_tag.clone(),
    };
    let view = ResultView::from_state(&state, &options)
        .ok_or_else(|| anyhow!("Selection does not resolve to two countries"))?;
    diagnostics::debug!("Verdict {verdict}", verdict: view.severity.as_str());

    if args.json {
        let json = serde_json::to_string_pretty(&view).with_context_msg("Failed to encode result")?;
        handler(&json);
    } else {
        handler(view.to_text().trim_end());
    }
    Ok(())
}
