use std::io::Write;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cmd::commands::{
    self, BuildArgs, CheckArgs, CountryArgs, build_command, check_command, countries_command,
    sitemap_command,
};
use diagnostics::LogLevel;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "plugsite")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Log progress to stderr (same as PLUGSITE_LOG=info)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a trip needs a plug adapter or a voltage converter
    Check(CheckArgs),
    /// Build the battery cross-reference site
    Build(BuildArgs),
    /// Generate one static page per country in the checker's dataset
    Countries(CountryArgs),
    /// Write sitemap.xml and robots.txt for the checker's pages
    Sitemap(CountryArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    diagnostics::init_with_floor(if cli.verbose {
        LogLevel::Info
    } else {
        LogLevel::Off
    });

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let print = |line: &str| {
        _ = writeln!(out, "{line}");
    };

    match &cli.command {
        Commands::Check(args) => {
            let locale = commands::locale_from_env();
            check_command(args, locale.as_deref(), print)
        }
        Commands::Build(args) => build_command(args, sitegen::base_url_from_env(), print),
        Commands::Countries(args) => countries_command(args, sitegen::base_url_from_env(), print),
        Commands::Sitemap(args) => sitemap_command(args, sitegen::base_url_from_env(), print),
    }
}
