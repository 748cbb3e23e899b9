//! Built-in page templates and their slot sets.
//!
//! Every template ships compiled into the binary. A source tree may carry a
//! `templates/` directory with files of the same name to override them.

use crate::config::SiteConfig;
use crate::error::{Result, SiteError};
use crate::template::{Fills, Slot, Template, TemplateError};
use std::path::Path;

slots! {
    /// Outer document shared by every battery site page.
    pub enum LayoutSlot for "layout.html" {
        PageTitle => "PAGE_TITLE",
        MetaDescription => "META_DESCRIPTION",
        CanonicalUrl => "CANONICAL_URL",
        SiteName => "SITE_NAME",
        BaseUrl => "BASE_URL",
        Content => "CONTENT",
    }
}

slots! {
    pub enum HomeSlot for "index.html" {
        PopularLinks => "POPULAR_LINKS",
        AdHero => "AD_HERO",
    }
}

slots! {
    pub enum PageSlot for "page.html" {
        Title => "TITLE",
        Body => "BODY",
    }
}

slots! {
    pub enum BatterySlot for "battery.html" {
        Code => "BATTERY_CODE",
        Equivalents => "EQUIVALENTS",
        Chemistry => "CHEMISTRY",
        Voltage => "VOLTAGE",
        Diameter => "DIAMETER",
        Height => "HEIGHT",
        Uses => "USES",
        Notes => "NOTES",
        AffiliateButtons => "AFFILIATE_BUTTONS",
        CompareLinks => "COMPARE_LINKS",
        AdTop => "AD_TOP",
        SimilarProducts => "SIMILAR_PRODUCTS",
    }
}

slots! {
    pub enum CompareSlot for "compare.html" {
        A => "A",
        B => "B",
        AChemistry => "A_CHEM",
        BChemistry => "B_CHEM",
        AVoltage => "A_VOLT",
        BVoltage => "B_VOLT",
        ADiameter => "A_DIA",
        BDiameter => "B_DIA",
        AHeight => "A_HGT",
        BHeight => "B_HGT",
        AUses => "A_USE",
        BUses => "B_USE",
        AdTop => "AD_TOP",
    }
}

slots! {
    pub enum CategorySlot for "category.html" {
        Title => "CATEGORY_TITLE",
        Intro => "CATEGORY_INTRO",
        Items => "ITEMS",
        AdTop => "AD_TOP",
    }
}

/// The full template set used by a battery site build.
#[derive(Debug, Clone)]
pub struct Templates {
    pub layout: Template<LayoutSlot>,
    pub home: Template<HomeSlot>,
    pub page: Template<PageSlot>,
    pub battery: Template<BatterySlot>,
    pub compare: Template<CompareSlot>,
    pub category: Template<CategorySlot>,
}

impl Templates {
    pub fn builtin() -> Self {
        Self {
            layout: Template::new(include_str!("../templates/layout.html")),
            home: Template::new(include_str!("../templates/index.html")),
            page: Template::new(include_str!("../templates/page.html")),
            battery: Template::new(include_str!("../templates/battery.html")),
            compare: Template::new(include_str!("../templates/compare.html")),
            category: Template::new(include_str!("../templates/category.html")),
        }
    }

    /// Built-in templates, each replaced by `dir/<name>` when that file exists.
    pub fn load(dir: &Path) -> Result<Self> {
        let builtin = Self::builtin();
        Ok(Self {
            layout: overridden(dir, builtin.layout)?,
            home: overridden(dir, builtin.home)?,
            page: overridden(dir, builtin.page)?,
            battery: overridden(dir, builtin.battery)?,
            compare: overridden(dir, builtin.compare)?,
            category: overridden(dir, builtin.category)?,
        })
    }
}

fn overridden<S: Slot>(dir: &Path, builtin: Template<S>) -> Result<Template<S>> {
    let path = dir.join(S::TEMPLATE);
    if !path.is_file() {
        return Ok(builtin);
    }
    let source = std::fs::read_to_string(&path).map_err(|source| SiteError::Read {
        path: path.clone(),
        source,
    })?;
    diagnostics::debug!("Using template override {template}", template: S::TEMPLATE);
    Ok(Template::new(source))
}

/// Head metadata for one page.
#[derive(Debug, Clone)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    /// Site path, e.g. `/battery/CR2032/`
    pub path: String,
}

/// Wrap already-rendered content in the site layout.
pub fn wrap(
    layout: &Template<LayoutSlot>,
    config: &SiteConfig,
    meta: &PageMeta,
    content: String,
) -> std::result::Result<String, TemplateError> {
    layout.render(
        &Fills::new()
            .text(LayoutSlot::PageTitle, meta.title.as_str())
            .text(LayoutSlot::MetaDescription, meta.description.as_str())
            .text(LayoutSlot::CanonicalUrl, config.absolute(&meta.path))
            .text(LayoutSlot::SiteName, config.site_name.as_str())
            .text(LayoutSlot::BaseUrl, config.base_url.as_str())
            .raw(LayoutSlot::Content, content),
    )
}

/// Ad placeholder markup, or nothing when ads are disabled.
pub fn ad_slot(config: &SiteConfig, name: &str) -> String {
    if config.ad_placements_enabled {
        format!("<!-- {name} ad slot (replace with AdSense code) -->")
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates_use_every_slot() {
        fn check<S: Slot>(template: &Template<S>, source: &str) {
            let _ = template;
            for slot in S::ALL {
                let token = format!("{{{{{}}}}}", slot.token());
                assert!(source.contains(&token), "{} lacks {}", S::TEMPLATE, token);
            }
        }
        let t = Templates::builtin();
        check(&t.layout, include_str!("../templates/layout.html"));
        check(&t.home, include_str!("../templates/index.html"));
        check(&t.page, include_str!("../templates/page.html"));
        check(&t.battery, include_str!("../templates/battery.html"));
        check(&t.compare, include_str!("../templates/compare.html"));
        check(&t.category, include_str!("../templates/category.html"));
    }

    #[test]
    fn test_wrap_escapes_metadata() {
        let config = SiteConfig {
            site_name: "Cells & Co".to_string(),
            ..SiteConfig::default()
        };
        let meta = PageMeta {
            title: "A <b> title".to_string(),
            description: "say \"hi\"".to_string(),
            path: "/x/".to_string(),
        };
        let html = wrap(&Templates::builtin().layout, &config, &meta, "<p>body</p>".to_string())
            .expect("layout renders");
        assert!(html.contains("<title>A &lt;b&gt; title</title>"));
        assert!(html.contains("content=\"say &quot;hi&quot;\""));
        assert!(html.contains("Cells &amp; Co"));
        assert!(html.contains("<link rel=\"canonical\" href=\"https://example.com/x/\">"));
        assert!(html.contains("<p>body</p>"));
    }

    #[test]
    fn test_override_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("page.html"), "<h2>{{TITLE}}</h2>{{BODY}}").expect("write");
        let t = Templates::load(dir.path()).expect("loads");
        let out = t
            .page
            .render(&Fills::new().text(PageSlot::Title, "T").raw(PageSlot::Body, "<p/>"))
            .expect("renders");
        assert_eq!(out, "<h2>T</h2><p/>");
    }

    #[test]
    fn test_ad_slot() {
        let mut config = SiteConfig::default();
        assert_eq!(ad_slot(&config, "top"), "");
        config.ad_placements_enabled = true;
        assert_eq!(ad_slot(&config, "top"), "<!-- top ad slot (replace with AdSense code) -->");
    }
}
