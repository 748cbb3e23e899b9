use crate::error_utils::ErrorContext;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct BuildArgs {
    /// Source directory with config.json, data/, templates/ and assets/
    #[arg(default_value = "site")]
    pub source: PathBuf,

    /// Output directory; removed and recreated on every build
    #[arg(default_value = "dist")]
    pub dist: PathBuf,

    /// Canonical base URL (overrides SITE_URL, DEPLOY_PRIME_URL and config.json)
    #[arg(long)]
    pub base_url: Option<String>,
}

/// Build the battery site. `env_base_url` is the deploy environment's URL.
pub fn build_command<F>(
    args: &BuildArgs,
    env_base_url: Option<String>,
    mut handler: F,
) -> Result<()>
where
    F: FnMut(&str),
{
    let base_url = args.base_url.clone().or(env_base_url);
    let summary = sitegen::build_battery_site(&args.source, &args.dist, base_url)
        .site_context("build site from", &args.source)?;

    handler(&format!(
        "Build complete: {} pages ({} comparisons), {} static files, {} sitemap URLs. See {}",
        summary.pages,
        summary.compare_pages,
        summary.static_files,
        summary.sitemap_urls,
        args.dist.display()
    ));
    if summary.skipped_references > 0 {
        handler(&format!(
            "Skipped {} compare references to missing or identical batteries",
            summary.skipped_references
        ));
    }
    Ok(())
}
