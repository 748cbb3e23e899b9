use super::countries::CountryArgs;
use crate::error_utils::ErrorContext;
use anyhow::Result;

/// Write `sitemap.xml` and `robots.txt` for the checker and its country pages.
pub fn sitemap_command<F>(
    args: &CountryArgs,
    env_base_url: Option<String>,
    mut handler: F,
) -> Result<()>
where
    F: FnMut(&str),
{
    let countries = args.load()?;
    let base_url = args.base_url(env_base_url);
    let count = sitegen::write_country_sitemap(&countries, &args.out, base_url.as_deref())
        .site_context("write sitemap to", &args.out)?;
    handler(&format!("sitemap.xml with {} URLs created.", count));
    Ok(())
}
