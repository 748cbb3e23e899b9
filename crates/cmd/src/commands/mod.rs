pub mod build;
pub mod check;
pub mod countries;
pub mod sitemap;

pub use build::{BuildArgs, build_command};
pub use check::{CheckArgs, check_command, locale_from_env};
pub use countries::{CountryArgs, countries_command};
pub use sitemap::sitemap_command;
