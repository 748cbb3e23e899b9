//! The battery cross-reference site.
//!
//! A source directory holds `config.json`, `data/batteries.json`, optional
//! `templates/` overrides and an optional `assets/` tree. A build cleans the
//! output directory and writes, in order: static files, the home page, the
//! search page, guides, categories, one page per battery, one page per
//! compare pair, and finally `sitemap.xml` and `robots.txt` listing exactly
//! the pages that were written.

use crate::battery::{Battery, load_batteries};
use crate::config::SiteConfig;
use crate::error::Result;
use crate::layouts::{
    self, BatterySlot, CategorySlot, CompareSlot, HomeSlot, PageMeta, PageSlot, Templates,
};
use crate::output::OutputDir;
use crate::routes::{self, ComparePair, Route};
use crate::sitemap::SitemapBuilder;
use crate::template::{Fills, escape_html};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

const MISSING: &str = "—";

/// Codes linked from the home page when present in the dataset.
const POPULAR: [&str; 5] = ["LR44", "CR2032", "CR2025", "SR626SW", "A312"];

const SEARCH_CONTENT: &str = r#"<section class="card"><h1>Search</h1><div id="search-results" aria-live="polite"></div></section>"#;

struct Category {
    slug: &'static str,
    title: &'static str,
    intro: &'static str,
    prefixes: &'static [&'static str],
}

const CATEGORIES: [Category; 3] = [
    Category {
        slug: "coin-cells",
        title: "Coin Cells (CR)",
        intro: "Lithium 3V coin cells used in key fobs, motherboards, and small devices.",
        prefixes: &["CR"],
    },
    Category {
        slug: "button-cells",
        title: "Button Cells (LR/SR)",
        intro: "Alkaline (LR) and Silver Oxide (SR) 1.5V/1.55V button cells for watches and small electronics.",
        prefixes: &["LR", "SR"],
    },
    Category {
        slug: "hearing-aid",
        title: "Hearing Aid Batteries (A-series)",
        intro: "Zinc-Air batteries commonly labelled A10, A13, A312, A675.",
        prefixes: &["A"],
    },
];

impl Category {
    fn contains(&self, battery: &Battery) -> bool {
        let code = battery.code.to_uppercase();
        self.prefixes.iter().any(|prefix| code.starts_with(prefix))
    }
}

struct Guide {
    slug: &'static str,
    title: &'static str,
    body: String,
}

fn guides(config: &SiteConfig) -> Vec<Guide> {
    let site_name = escape_html(&config.site_name);
    let email = escape_html(&config.support_email);
    vec![
        Guide {
            slug: "battery-codes",
            title: "Battery Code Systems Explained",
            body: "<p>LR = alkaline button cells, SR = silver oxide, CR = lithium coin cells, A = zinc-air hearing aid sizes. Numbers typically encode diameter and height in tenths of millimeters (e.g., CR2032 is 20.0mm x 3.2mm).</p>".to_string(),
        },
        Guide {
            slug: "identify-battery",
            title: "How to Identify Your Battery",
            body: "<ol><li>Check the printed code on the battery.</li><li>Measure diameter and height.</li><li>Match chemistry: LR/SR (1.5V) vs CR (3V) vs A (1.45V).</li></ol>".to_string(),
        },
        Guide {
            slug: "alkaline-vs-silver-oxide",
            title: "Alkaline vs Silver Oxide",
            body: "<p>Silver oxide (SR) cells hold voltage more consistently under load, making them better for timekeeping devices like watches. Alkaline (LR) are cheaper but may have shorter life.</p>".to_string(),
        },
        Guide {
            slug: "about",
            title: "About",
            body: format!("<p>{site_name} is a fast, simple reference for battery equivalents. Data is compiled from manufacturer datasheets and common industry references.</p>"),
        },
        Guide {
            slug: "contact",
            title: "Contact",
            body: format!("<p>Questions or corrections? Email <a href=\"mailto:{email}\">{email}</a>.</p>"),
        },
    ]
}

/// Counts reported after a build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub pages: usize,
    pub compare_pages: usize,
    /// Static files copied (assets and the dataset)
    pub static_files: usize,
    /// Compare references skipped as self-pairs or unknown codes
    pub skipped_references: usize,
    pub sitemap_urls: usize,
}

/// Everything needed to render the site.
#[derive(Debug, Clone)]
pub struct BatterySite {
    pub config: SiteConfig,
    pub batteries: Vec<Battery>,
    pub templates: Templates,
    source: Option<PathBuf>,
}

impl BatterySite {
    /// Site with built-in templates and no static files to copy.
    pub fn new(config: SiteConfig, batteries: Vec<Battery>) -> Self {
        Self {
            config,
            batteries,
            templates: Templates::builtin(),
            source: None,
        }
    }

    /// Read a source directory. `base_url` replaces the configured one.
    pub fn load(source: &Path, base_url: Option<String>) -> Result<Self> {
        let config_path = source.join("config.json");
        let config = if config_path.is_file() {
            SiteConfig::load(&config_path)?
        } else {
            let path = config_path.display().to_string();
            diagnostics::warn!("No {path}, using default site settings", path: path.as_str());
            SiteConfig::default()
        };
        let config = config.with_base_url(base_url);
        let batteries = load_batteries(&source.join("data").join("batteries.json"))?;
        let templates = Templates::load(&source.join("templates"))?;
        Ok(Self {
            config,
            batteries,
            templates,
            source: Some(source.to_path_buf()),
        })
    }

    /// Clean `dist` and write the whole site into it.
    pub fn build(&self, dist: &Path) -> Result<BuildSummary> {
        let mut build = Build {
            site: self,
            out: OutputDir::clean(dist)?,
            sitemap: SitemapBuilder::new(&self.config.base_url),
            summary: BuildSummary::default(),
        };
        build.static_files()?;
        build.home()?;
        build.search()?;
        build.guides()?;
        build.categories()?;
        build.battery_pages()?;
        build.compare_pages()?;
        build.sitemap()?;

        let summary = build.summary;
        let files = build.out.written();
        let dist = dist.display().to_string();
        diagnostics::info!(
            "Built {pages} pages ({compare} comparisons), {files} files in total, into {dist}",
            pages: summary.pages,
            compare: summary.compare_pages,
            files: files,
            dist: dist.as_str()
        );
        Ok(summary)
    }
}

/// Load `source` and build it into `dist`.
pub fn build_battery_site(
    source: &Path,
    dist: &Path,
    base_url: Option<String>,
) -> Result<BuildSummary> {
    BatterySite::load(source, base_url)?.build(dist)
}

struct Build<'a> {
    site: &'a BatterySite,
    out: OutputDir,
    sitemap: SitemapBuilder,
    summary: BuildSummary,
}

impl Build<'_> {
    fn config(&self) -> &SiteConfig {
        &self.site.config
    }

    fn templates(&self) -> &Templates {
        &self.site.templates
    }

    fn page(
        &mut self,
        route: &Route,
        title: String,
        description: String,
        content: String,
    ) -> Result<()> {
        let meta = PageMeta {
            title,
            description,
            path: route.path.clone(),
        };
        let html = layouts::wrap(&self.templates().layout, self.config(), &meta, content)?;
        self.out.write(&route.output, &html)?;
        self.sitemap.push(&route.path);
        self.summary.pages += 1;
        Ok(())
    }

    fn static_files(&mut self) -> Result<()> {
        let Some(source) = self.site.source.as_deref() else {
            return Ok(());
        };
        let assets = source.join("assets");
        if assets.is_dir() {
            self.summary.static_files += self.out.copy_dir(&assets, "assets")?;
        }
        let data = source.join("data").join("batteries.json");
        if data.is_file() {
            self.out.copy_file(&data, "data/batteries.json")?;
            self.summary.static_files += 1;
        }
        Ok(())
    }

    fn home(&mut self) -> Result<()> {
        let links: String = POPULAR
            .iter()
            .filter_map(|candidate| {
                self.site
                    .batteries
                    .iter()
                    .find(|b| b.code.eq_ignore_ascii_case(candidate))
            })
            .map(|b| {
                let code = escape_html(&b.code);
                let href = escape_html(&routes::battery(&b.code).path);
                format!("<li><a class=\"pill\" href=\"{href}\">{code}</a></li>")
            })
            .collect();
        let content = self.templates().home.render(
            &Fills::new()
                .raw(HomeSlot::PopularLinks, links)
                .raw(HomeSlot::AdHero, layouts::ad_slot(self.config(), "hero")),
        )?;
        let title = format!("{} — Battery Cross-Reference", self.config().site_name);
        self.page(
            &routes::home(),
            title,
            "Lookup table for LR, SR, CR, and A-series battery equivalents and replacements.".to_string(),
            content,
        )
    }

    fn search(&mut self) -> Result<()> {
        let title = format!("Search — {}", self.config().site_name);
        self.page(
            &routes::search(),
            title,
            "Search battery codes and equivalents.".to_string(),
            SEARCH_CONTENT.to_string(),
        )
    }

    fn guides(&mut self) -> Result<()> {
        for guide in guides(self.config()) {
            let content = self.templates().page.render(
                &Fills::new()
                    .text(PageSlot::Title, guide.title)
                    .raw(PageSlot::Body, guide.body),
            )?;
            let title = format!("{} — {}", guide.title, self.config().site_name);
            let description = format!("{} for small batteries.", guide.title);
            self.page(&routes::guide(guide.slug), title, description, content)?;
        }
        Ok(())
    }

    fn categories(&mut self) -> Result<()> {
        let site = self.site;
        for category in &CATEGORIES {
            let mut members: Vec<&Battery> = site
                .batteries
                .iter()
                .filter(|b| category.contains(b))
                .collect();
            members.sort_by(|a, b| a.code.cmp(&b.code));
            let items: String = members
                .iter()
                .map(|b| {
                    let names: Vec<&str> = b.names.iter().take(6).map(String::as_str).collect();
                    format!(
                        "<li><a href=\"{}\">{}</a> — {}</li>",
                        escape_html(&routes::battery(&b.code).path),
                        escape_html(&b.code),
                        escape_html(&names.join(", "))
                    )
                })
                .collect();
            let content = self.templates().category.render(
                &Fills::new()
                    .text(CategorySlot::Title, category.title)
                    .text(CategorySlot::Intro, category.intro)
                    .raw(CategorySlot::Items, items)
                    .raw(CategorySlot::AdTop, layouts::ad_slot(self.config(), "top")),
            )?;
            let title = format!("{} — {}", category.title, self.config().site_name);
            let description = format!("{} index.", category.title);
            self.page(&routes::category(category.slug), title, description, content)?;
        }
        Ok(())
    }

    fn battery_pages(&mut self) -> Result<()> {
        let site = self.site;
        let known: HashSet<&str> = site.batteries.iter().map(|b| b.code.as_str()).collect();
        for battery in &site.batteries {
            let equivalents = list_or_missing(&battery.names);
            let content = self.templates().battery.render(
                &Fills::new()
                    .text(BatterySlot::Code, battery.code.as_str())
                    .text(BatterySlot::Equivalents, equivalents.as_str())
                    .text(BatterySlot::Chemistry, text_or_missing(battery.chemistry.as_deref()))
                    .text(BatterySlot::Voltage, text_or_missing(battery.voltage.as_deref()))
                    .text(BatterySlot::Diameter, millimetres(battery.diameter_mm))
                    .text(BatterySlot::Height, millimetres(battery.height_mm))
                    .text(BatterySlot::Uses, list_or_missing(&battery.common_uses))
                    .text(BatterySlot::Notes, battery.notes.as_deref().unwrap_or_default())
                    .raw(BatterySlot::AffiliateButtons, affiliate_buttons(battery))
                    .raw(BatterySlot::CompareLinks, compare_links(battery, &known))
                    .raw(BatterySlot::AdTop, layouts::ad_slot(self.config(), "top"))
                    .raw(BatterySlot::SimilarProducts, similar_products(&battery.names)),
            )?;
            let title = format!(
                "{} Equivalent & Replacements — {}",
                battery.code,
                self.config().site_name
            );
            let description = format!(
                "{} equivalents: {}. Specs, sizes, and where to buy.",
                battery.code, equivalents
            );
            self.page(&routes::battery(&battery.code), title, description, content)?;
        }
        Ok(())
    }

    fn compare_pages(&mut self) -> Result<()> {
        let site = self.site;
        let by_code: HashMap<&str, &Battery> =
            site.batteries.iter().map(|b| (b.code.as_str(), b)).collect();
        let (pairs, skipped) = routes::compare_pairs(&site.batteries);
        self.summary.skipped_references = skipped;

        for pair in &pairs {
            let (Some(a), Some(b)) = (by_code.get(pair.a.as_str()), by_code.get(pair.b.as_str()))
            else {
                continue;
            };
            let content = self.templates().compare.render(
                &Fills::new()
                    .text(CompareSlot::A, a.code.as_str())
                    .text(CompareSlot::B, b.code.as_str())
                    .text(CompareSlot::AChemistry, text_or_missing(a.chemistry.as_deref()))
                    .text(CompareSlot::BChemistry, text_or_missing(b.chemistry.as_deref()))
                    .text(CompareSlot::AVoltage, text_or_missing(a.voltage.as_deref()))
                    .text(CompareSlot::BVoltage, text_or_missing(b.voltage.as_deref()))
                    .text(CompareSlot::ADiameter, millimetres(a.diameter_mm))
                    .text(CompareSlot::BDiameter, millimetres(b.diameter_mm))
                    .text(CompareSlot::AHeight, millimetres(a.height_mm))
                    .text(CompareSlot::BHeight, millimetres(b.height_mm))
                    .text(CompareSlot::AUses, list_or_missing(&a.common_uses))
                    .text(CompareSlot::BUses, list_or_missing(&b.common_uses))
                    .raw(CompareSlot::AdTop, layouts::ad_slot(self.config(), "top")),
            )?;
            let title = format!("{} vs {} — Which to use?", a.code, b.code);
            let description = format!(
                "Compare {} and {}: chemistry, voltage, size, use-cases.",
                a.code, b.code
            );
            self.page(&pair.route(), title, description, content)?;
            self.summary.compare_pages += 1;
        }
        Ok(())
    }

    fn sitemap(&mut self) -> Result<()> {
        self.out.write("sitemap.xml", &self.sitemap.to_xml())?;
        self.out.write("robots.txt", &self.sitemap.robots_txt())?;
        self.summary.sitemap_urls = self.sitemap.urls().len();
        Ok(())
    }
}

fn text_or_missing(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(MISSING)
}

fn list_or_missing(items: &[String]) -> String {
    if items.is_empty() {
        MISSING.to_string()
    } else {
        items.join(", ")
    }
}

fn millimetres(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

fn affiliate_buttons(battery: &Battery) -> String {
    battery
        .affiliate
        .iter()
        .map(|(vendor, url)| {
            format!(
                "<a class=\"button\" href=\"{}\" rel=\"nofollow sponsored\" target=\"_blank\">Buy on {}</a>",
                escape_html(url),
                escape_html(&capitalize(vendor))
            )
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Links to the canonical compare page of every known, distinct partner.
fn compare_links(battery: &Battery, known: &HashSet<&str>) -> String {
    let mut seen = HashSet::new();
    battery
        .compare_with
        .iter()
        .filter(|other| known.contains(other.as_str()))
        .filter_map(|other| Some((other, ComparePair::new(&battery.code, other)?)))
        .filter(|(_, pair)| seen.insert(pair.clone()))
        .map(|(other, pair)| {
            format!(
                "<li><a href=\"{}\">{} vs {}</a></li>",
                escape_html(&pair.route().path),
                escape_html(&battery.code),
                escape_html(other)
            )
        })
        .collect()
}

/// JSON string list for the JSON-LD block. `<` is escaped so a name cannot
/// close the surrounding script element.
fn similar_products(names: &[String]) -> String {
    names
        .iter()
        .map(|name| {
            serde_json::Value::String(name.clone())
                .to_string()
                .replace('<', "\\u003c")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battery::batteries_from_str;

    fn fixture() -> Vec<Battery> {
        batteries_from_str(
            r#"[
            {"code": "CR2032", "names": ["DL2032", "ECR2032"], "chemistry": "Lithium", "voltage": "3V",
             "diameter_mm": 20, "height_mm": 3.2, "common_uses": ["Key fobs"],
             "compare_with": ["LR44", "CR2032", "CR1616"],
             "affiliate": {"amazon": "https://a.test/?q=cr2032&x=1"}},
            {"code": "LR44", "names": ["AG13", "A76"], "chemistry": "Alkaline", "voltage": 1.5,
             "compare_with": ["CR2032", "SR44"]},
            {"code": "SR44", "names": ["357", "<b>bold</b>"], "notes": "Silver & oxide"},
            {"code": "A312", "names": ["PR41"]}
        ]"#,
        )
        .expect("fixture parses")
    }

    fn build(config: SiteConfig) -> (tempfile::TempDir, BuildSummary) {
        let dir = tempfile::tempdir().expect("tempdir");
        let summary = BatterySite::new(config, fixture())
            .build(&dir.path().join("dist"))
            .expect("build succeeds");
        (dir, summary)
    }

    fn read(dir: &tempfile::TempDir, relative: &str) -> String {
        std::fs::read_to_string(dir.path().join("dist").join(relative)).expect("page exists")
    }

    #[test]
    fn test_one_compare_page_per_unordered_pair() {
        let (dir, summary) = build(SiteConfig::default());
        assert!(dir.path().join("dist/compare/cr2032-vs-lr44/index.html").is_file());
        assert!(!dir.path().join("dist/compare/lr44-vs-cr2032").exists());
        assert!(dir.path().join("dist/compare/lr44-vs-sr44/index.html").is_file());
        assert_eq!(summary.compare_pages, 2);
        // self-pair plus CR1616, which is not in the dataset
        assert_eq!(summary.skipped_references, 2);
    }

    #[test]
    fn test_sitemap_lists_every_page_once() {
        let (dir, summary) =
            build(SiteConfig::default().with_base_url(Some("https://cells.test".into())));
        let xml = read(&dir, "sitemap.xml");
        // home + search + 5 guides + 3 categories + 4 batteries + 2 comparisons
        assert_eq!(summary.pages, 16);
        assert_eq!(summary.sitemap_urls, 16);
        assert_eq!(xml.matches("<loc>").count(), 16);
        assert!(xml.contains("<loc>https://cells.test/compare/cr2032-vs-lr44/</loc>"));
        assert!(xml.contains("<loc>https://cells.test/battery/A312/</loc>"));
        assert_eq!(
            read(&dir, "robots.txt"),
            "User-agent: *\nAllow: /\n\nSitemap: https://cells.test/sitemap.xml\n"
        );
    }

    #[test]
    fn test_battery_page_content() {
        let (dir, _) = build(SiteConfig::default());
        let html = read(&dir, "battery/CR2032/index.html");
        assert!(html.contains("CR2032 battery equivalents"));
        assert!(html.contains("Also sold as: DL2032, ECR2032"));
        assert!(html.contains("<td>20 mm</td>"));
        assert!(html.contains("<td>3.2 mm</td>"));
        assert!(html.contains("Buy on Amazon"));
        assert!(html.contains("href=\"https://a.test/?q=cr2032&amp;x=1\""));
        assert!(html.contains("<a href=\"/compare/cr2032-vs-lr44/\">CR2032 vs LR44</a>"));
        assert!(!html.contains("CR1616"));
        assert!(
            html.contains("<link rel=\"canonical\" href=\"https://example.com/battery/CR2032/\">")
        );

        let html = read(&dir, "battery/SR44/index.html");
        assert!(html.contains("Silver &amp; oxide"));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(html.contains(r#""\u003cb>bold\u003c/b>""#));
        assert!(!html.contains("<b>bold</b>"));
        assert!(html.contains("<td>—</td>"));

        let html = read(&dir, "battery/LR44/index.html");
        assert!(html.contains("<td>1.5</td>"));
    }

    #[test]
    fn test_categories_home_and_ads() {
        let config = SiteConfig {
            ad_placements_enabled: true,
            ..SiteConfig::default()
        };
        let (dir, _) = build(config);

        let coin = read(&dir, "category/coin-cells/index.html");
        assert!(coin.contains("<a href=\"/battery/CR2032/\">CR2032</a> — DL2032, ECR2032"));
        assert!(!coin.contains("LR44"));
        assert!(coin.contains("<!-- top ad slot (replace with AdSense code) -->"));

        let button = read(&dir, "category/button-cells/index.html");
        let lr = button.find("LR44").expect("LR44 listed");
        let sr = button.find("SR44").expect("SR44 listed");
        assert!(lr < sr);

        let home = read(&dir, "index.html");
        assert!(home.contains("<a class=\"pill\" href=\"/battery/LR44/\">LR44</a>"));
        assert!(home.contains("<a class=\"pill\" href=\"/battery/A312/\">A312</a>"));
        assert!(!home.contains("/battery/CR2025/"));
        assert!(home.contains("hero ad slot"));
    }

    #[test]
    fn test_ads_disabled_render_nothing() {
        let (dir, _) = build(SiteConfig::default());
        assert!(!read(&dir, "category/hearing-aid/index.html").contains("ad slot"));
    }

    #[test]
    fn test_guides_escape_config_values() {
        let config = SiteConfig {
            site_name: "Cells <&> Co".to_string(),
            support_email: "help@cells.test".to_string(),
            ..SiteConfig::default()
        };
        let (dir, _) = build(config);
        let about = read(&dir, "guides/about/index.html");
        assert!(about.contains("<p>Cells &lt;&amp;&gt; Co is a fast, simple reference"));
        let contact = read(&dir, "guides/contact/index.html");
        assert!(contact.contains("<a href=\"mailto:help@cells.test\">help@cells.test</a>"));
    }

    #[test]
    fn test_build_from_source_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("src");
        std::fs::create_dir_all(source.join("data")).expect("mkdir");
        std::fs::create_dir_all(source.join("assets")).expect("mkdir");
        std::fs::create_dir_all(source.join("templates")).expect("mkdir");
        std::fs::write(
            source.join("config.json"),
            r#"{"siteName": "Cells", "baseUrl": "https://cfg.test"}"#,
        )
        .expect("write");
        std::fs::write(source.join("data/batteries.json"), r#"[{"code": "LR44"}]"#).expect("write");
        std::fs::write(source.join("assets/styles.css"), "body{}").expect("write");
        std::fs::write(source.join("templates/page.html"), "<section>{{TITLE}}{{BODY}}</section>")
            .expect("write");

        let dist = dir.path().join("dist");
        std::fs::create_dir_all(&dist).expect("mkdir");
        std::fs::write(dist.join("stale.html"), "old").expect("write");

        let summary = build_battery_site(&source, &dist, Some("https://env.test/".to_string()))
            .expect("builds");
        assert_eq!(summary.static_files, 2);
        assert!(!dist.join("stale.html").exists());
        assert!(dist.join("assets/styles.css").is_file());
        assert!(dist.join("data/batteries.json").is_file());
        let about = std::fs::read_to_string(dist.join("guides/about/index.html")).expect("read");
        assert!(about.contains("<section>About<p>Cells is"));
        let sitemap = std::fs::read_to_string(dist.join("sitemap.xml")).expect("read");
        assert!(sitemap.contains("<loc>https://env.test/</loc>"));
    }
}
