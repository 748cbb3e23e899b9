//! # Sitegen — static pages for the battery cross-reference and plug checker
//!
//! Two generators share one toolkit:
//!
//! - the **battery site** ([`battery_site`]): typed `{{TOKEN}}` templates
//!   filled from `data/batteries.json`, written to a clean dist directory
//!   together with `sitemap.xml` and `robots.txt`;
//! - the **country pages** ([`country_pages`]): one Maud-rendered page per
//!   country in the checker's dataset, plus an index and a sitemap.
//!
//! ```bash
//! plugsite build ./site ./dist
//! plugsite countries --data data.json --out .
//! ```

#[macro_use]
mod template;

pub mod battery;
pub mod battery_site;
pub mod config;
pub mod country_pages;
mod error;
pub mod layouts;
pub mod output;
pub mod routes;
pub mod sitemap;

pub use battery::{Battery, load_batteries};
pub use battery_site::{BatterySite, BuildSummary, build_battery_site};
pub use config::{SiteConfig, base_url_from_env};
pub use country_pages::{CountrySummary, build_country_pages};
pub use error::{Result, SiteError};
pub use sitemap::{SitemapBuilder, write_country_sitemap};
pub use template::{Fills, Slot, Template, TemplateError, escape_html};
