//! Battery site configuration, read from `config.json` in the source tree.
//!
//! ```json
//! {
//!   "siteName": "Button Cell Finder",
//!   "baseUrl": "https://cells.example.org",
//!   "supportEmail": "help@example.org",
//!   "adPlacementsEnabled": false
//! }
//! ```

use crate::error::{Result, SiteError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Base URL used when neither the config nor the environment provides one.
pub const PLACEHOLDER_BASE_URL: &str = "https://example.com";

/// Environment variables consulted for the deployed base URL, in order.
pub const BASE_URL_ENV: [&str; 2] = ["SITE_URL", "DEPLOY_PRIME_URL"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    #[serde(default = "default_site_name")]
    pub site_name: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub support_email: String,
    /// Emits the ad placeholder markup when set
    #[serde(default)]
    pub ad_placements_enabled: bool,
}

fn default_site_name() -> String {
    "Button Cell Finder".to_string()
}

fn default_base_url() -> String {
    PLACEHOLDER_BASE_URL.to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: default_site_name(),
            base_url: default_base_url(),
            support_email: String::new(),
            ad_placements_enabled: false,
        }
    }
}

impl SiteConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SiteError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SiteConfig = serde_json::from_str(&text).map_err(|source| SiteError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.normalized())
    }

    /// Replace the configured base URL, e.g. from the deploy environment.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(base) = base_url {
            self.base_url = base;
        }
        self.normalized()
    }

    fn normalized(mut self) -> Self {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        self.base_url = if trimmed.is_empty() {
            default_base_url()
        } else {
            trimmed.to_string()
        };
        self
    }

    /// Absolute URL for a site path such as `/battery/CR2032/`.
    pub fn absolute(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Deployed base URL from the process environment.
pub fn base_url_from_env() -> Option<String> {
    base_url_from(|key| std::env::var(key).ok())
}

/// First non-empty of `SITE_URL`, `DEPLOY_PRIME_URL`, without a trailing `/`.
pub fn base_url_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    BASE_URL_ENV.iter().find_map(|key| {
        let value = lookup(key)?;
        let trimmed = value.trim().trim_end_matches('/');
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let config: SiteConfig = serde_json::from_str(r#"{"siteName":"Cells"}"#).expect("parses");
        assert_eq!(config.site_name, "Cells");
        assert_eq!(config.base_url, PLACEHOLDER_BASE_URL);
        assert!(!config.ad_placements_enabled);
    }

    #[test]
    fn test_base_url_override_and_trailing_slash() {
        let config = SiteConfig::default().with_base_url(Some("https://cells.test/".to_string()));
        assert_eq!(config.absolute("/battery/CR2032/"), "https://cells.test/battery/CR2032/");

        let config = SiteConfig::default().with_base_url(Some("   ".to_string()));
        assert_eq!(config.base_url, PLACEHOLDER_BASE_URL);
    }

    #[test]
    fn test_env_precedence() {
        let env: HashMap<&str, &str> = [
            ("SITE_URL", "https://prod.test/"),
            ("DEPLOY_PRIME_URL", "https://preview.test"),
        ]
        .into_iter()
        .collect();
        let get = |key: &str| env.get(key).map(|v| v.to_string());
        assert_eq!(base_url_from(get), Some("https://prod.test".to_string()));

        let preview_only =
            |key: &str| (key == "DEPLOY_PRIME_URL").then(|| "https://preview.test".to_string());
        assert_eq!(base_url_from(preview_only), Some("https://preview.test".to_string()));

        let blank = |_: &str| Some(String::new());
        assert_eq!(base_url_from(blank), None);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"siteName":"Cells","baseUrl":"https://c.test/","adPlacementsEnabled":true}"#,
        )
        .expect("write");
        let config = SiteConfig::load(&path).expect("loads");
        assert_eq!(config.base_url, "https://c.test");
        assert!(config.ad_placements_enabled);

        std::fs::write(&path, "{").expect("write");
        assert!(matches!(SiteConfig::load(&path), Err(SiteError::Json { .. })));
    }
}
