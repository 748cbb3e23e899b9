//! `sitemap.xml` and `robots.txt`.

use crate::config::PLACEHOLDER_BASE_URL;
use crate::error::Result;
use crate::output::OutputDir;
use crate::routes;
use plugcheck::Country;
use std::collections::HashSet;
use std::path::Path;

/// Collects page URLs in generation order, dropping repeats.
#[derive(Debug, Clone)]
pub struct SitemapBuilder {
    base_url: String,
    seen: HashSet<String>,
    urls: Vec<String>,
}

impl SitemapBuilder {
    /// `base_url` without a trailing `/`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            seen: HashSet::new(),
            urls: Vec::new(),
        }
    }

    /// Record a site path such as `/battery/LR44/`. Returns `false` for a repeat.
    pub fn push(&mut self, path: &str) -> bool {
        let url = format!("{}{}", self.base_url, path);
        if !self.seen.insert(url.clone()) {
            return false;
        }
        self.urls.push(url);
        true
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
        );
        for url in &self.urls {
            xml.push_str("  <url><loc>");
            xml.push_str(&escape_xml(url));
            xml.push_str("</loc></url>\n");
        }
        xml.push_str("</urlset>\n");
        xml
    }

    pub fn robots_txt(&self) -> String {
        robots_txt(&self.base_url)
    }
}

pub fn robots_txt(base_url: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n",
        base_url.trim_end_matches('/')
    )
}

/// Sitemap for the checker: `/`, `/countries/`, then one URL per country.
pub fn country_sitemap(countries: &[Country], base_url: Option<&str>) -> SitemapBuilder {
    let mut sitemap = SitemapBuilder::new(base_url.unwrap_or(PLACEHOLDER_BASE_URL));
    sitemap.push(&routes::home().path);
    sitemap.push(&routes::country_index().path);
    for country in countries {
        sitemap.push(&routes::country(&country.name).path);
    }
    sitemap
}

/// Write `sitemap.xml` and `robots.txt` for the checker into `out_root`.
pub fn write_country_sitemap(
    countries: &[Country],
    out_root: &Path,
    base_url: Option<&str>,
) -> Result<usize> {
    let sitemap = country_sitemap(countries, base_url);
    let mut out = OutputDir::open(out_root)?;
    out.write("sitemap.xml", &sitemap.to_xml())?;
    out.write("robots.txt", &sitemap.robots_txt())?;
    let count = sitemap.urls().len();
    diagnostics::info!("sitemap.xml with {count} URLs created", count: count);
    Ok(count)
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_loc_per_unique_path() {
        let mut sitemap = SitemapBuilder::new("https://cells.test/");
        assert!(sitemap.push("/"));
        assert!(sitemap.push("/battery/LR44/"));
        assert!(!sitemap.push("/battery/LR44/"));
        assert!(sitemap.push("/compare/cr2032-vs-lr44/"));
        assert_eq!(sitemap.urls().len(), 3);

        let xml = sitemap.to_xml();
        assert_eq!(xml.matches("<loc>").count(), 3);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset"));
        assert!(xml.contains("  <url><loc>https://cells.test/battery/LR44/</loc></url>\n"));
    }

    #[test]
    fn test_locs_are_escaped() {
        let mut sitemap = SitemapBuilder::new("https://x.test");
        sitemap.push("/search/?a=1&b=2");
        assert!(sitemap.to_xml().contains("<loc>https://x.test/search/?a=1&amp;b=2</loc>"));
    }

    fn country(name: &str) -> Country {
        Country {
            name: name.to_string(),
            iso2: String::new(),
            plugs: vec![],
            voltage: 0.0,
            freq_text: String::new(),
        }
    }

    #[test]
    fn test_country_sitemap() {
        let countries = vec![
            country("United Kingdom"),
            country("Japan"),
            country("united kingdom"),
        ];
        let sitemap = country_sitemap(&countries, None);
        assert_eq!(
            sitemap.urls(),
            &[
                "https://example.com/",
                "https://example.com/countries/",
                "https://example.com/countries/united-kingdom.html",
                "https://example.com/countries/japan.html",
            ]
        );

        let dir = tempfile::tempdir().expect("tempdir");
        let count = write_country_sitemap(&countries, dir.path(), Some("https://plugs.test/"))
            .expect("writes");
        assert_eq!(count, 4);
        let robots = std::fs::read_to_string(dir.path().join("robots.txt")).expect("read");
        assert!(robots.ends_with("Sitemap: https://plugs.test/sitemap.xml\n"));
        let xml = std::fs::read_to_string(dir.path().join("sitemap.xml")).expect("read");
        assert!(xml.contains("<loc>https://plugs.test/countries/japan.html</loc>"));
    }

    #[test]
    fn test_country_named_index_is_listed_separately() {
        let countries = vec![country("Index")];
        let sitemap = country_sitemap(&countries, Some("https://plugs.test"));
        assert_eq!(
            sitemap.urls(),
            &[
                "https://plugs.test/",
                "https://plugs.test/countries/",
                "https://plugs.test/countries/index-country.html",
            ]
        );
    }

    #[test]
    fn test_robots() {
        assert_eq!(
            robots_txt("https://cells.test/"),
            "User-agent: *\nAllow: /\n\nSitemap: https://cells.test/sitemap.xml\n"
        );
    }
}
