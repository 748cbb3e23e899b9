use crate::error_utils::ErrorContext;
use anyhow::Result;
use clap::Args;
use plugcheck::dataset::Source;
use plugcheck::{Country, Required, load_countries};
use std::path::PathBuf;

/// Options shared by the country page and sitemap generators.
#[derive(Debug, Clone, Args)]
pub struct CountryArgs {
    /// Country dataset: a file path or an http(s) URL
    #[arg(long, default_value = "data.json")]
    pub data: String,

    /// Site root; pages go to <OUT>/countries/
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Canonical base URL (overrides SITE_URL and DEPLOY_PRIME_URL)
    #[arg(long)]
    pub base_url: Option<String>,
}

impl CountryArgs {
    pub(crate) fn load(&self) -> Result<Vec<Country>> {
        load_countries(&Source::parse(&self.data), Required::Name).dataset_context(&self.data)
    }

    pub(crate) fn base_url(&self, env_base_url: Option<String>) -> Option<String> {
        self.base_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .or(env_base_url)
    }
}

/// Generate `countries/*.html` and `countries/index.html`.
pub fn countries_command<F>(
    args: &CountryArgs,
    env_base_url: Option<String>,
    mut handler: F,
) -> Result<()>
where
    F: FnMut(&str),
{
    let countries = args.load()?;
    let base_url = args.base_url(env_base_url);
    let summary = sitegen::build_country_pages(&countries, &args.out, base_url.as_deref())
        .site_context("write country pages to", &args.out)?;

    handler(&format!("Generated {} country pages.", summary.pages));
    if summary.duplicates > 0 {
        handler(&format!(
            "Skipped {} countries whose page name was already used",
            summary.duplicates
        ));
    }
    Ok(())
}
