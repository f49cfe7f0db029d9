//! Sitemap URL list construction.

use std::cmp::Reverse;

use chrono::{NaiveDate, Utc};
use tracing::debug;
use vitrine_content::{Collections, ContentEntry};
use vitrine_seo::{absolute_url, SiteConfig, TemplateKind};

use crate::entry::{ChangeFreq, Priority, SitemapUrlEntry};

/// A route with a fixed priority and change frequency.
#[derive(Debug, Clone, Copy)]
struct StaticRoute {
    path: &'static str,
    priority: f64,
    changefreq: ChangeFreq,
}

const fn route(path: &'static str, priority: f64, changefreq: ChangeFreq) -> StaticRoute {
    StaticRoute {
        path,
        priority,
        changefreq,
    }
}

/// Pages every site has.
const STATIC_PAGES: [StaticRoute; 4] = [
    route("/", 1.0, ChangeFreq::Weekly),
    route("/services", 0.9, ChangeFreq::Weekly),
    route("/about", 0.7, ChangeFreq::Monthly),
    route("/contact", 0.8, ChangeFreq::Monthly),
];

const THERAPIST_PAGES: [StaticRoute; 2] = [
    route("/booking", 0.8, ChangeFreq::Weekly),
    route("/testimonials", 0.6, ChangeFreq::Monthly),
];

const RESTAURANT_PAGES: [StaticRoute; 3] = [
    route("/menu", 0.9, ChangeFreq::Weekly),
    route("/reservations", 0.8, ChangeFreq::Weekly),
    route("/events", 0.7, ChangeFreq::Weekly),
];

const ECOMMERCE_PAGES: [StaticRoute; 3] = [
    route("/shop", 0.9, ChangeFreq::Daily),
    route("/cart", 0.3, ChangeFreq::Never),
    route("/account", 0.3, ChangeFreq::Monthly),
];

/// Pages specific to a business category.
fn template_pages(kind: TemplateKind) -> &'static [StaticRoute] {
    match kind {
        TemplateKind::Therapist => &THERAPIST_PAGES,
        TemplateKind::Restaurant => &RESTAURANT_PAGES,
        TemplateKind::Ecommerce => &ECOMMERCE_PAGES,
        TemplateKind::Consultant => &[],
    }
}

/// Order of pages without an explicit `order`.
const UNORDERED_PAGE: i32 = 999;

/// Builds the sitemap URL list of a site.
pub struct SitemapBuilder<'c> {
    config: &'c SiteConfig,
    lastmod: NaiveDate,
}

impl<'c> SitemapBuilder<'c> {
    /// Create a builder stamping every entry with today's date (UTC).
    pub fn new(config: &'c SiteConfig) -> Self {
        Self {
            config,
            lastmod: Utc::now().date_naive(),
        }
    }

    /// Use a fixed `lastmod` date instead of today.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.lastmod = date;
        self
    }

    /// Build the URL list, sorted by priority descending.
    ///
    /// Static pages come first, then services (featured first), pages (by
    /// `order`) and template pages. The final sort is stable, so entries with
    /// equal priority keep that order.
    pub fn build(&self, collections: &Collections) -> Vec<SitemapUrlEntry> {
        let mut entries: Vec<SitemapUrlEntry> = STATIC_PAGES
            .iter()
            .map(|page| self.static_entry(page))
            .collect();

        let mut services: Vec<&ContentEntry> = collections.services.iter().collect();
        services.sort_by_key(|e| Reverse(e.featured()));
        entries.extend(services.into_iter().map(|service| {
            let priority = if service.featured() { 0.9 } else { 0.8 };
            self.entry(
                &format!("/services/{}", service.slug),
                priority,
                ChangeFreq::Monthly,
            )
        }));

        let mut pages: Vec<&ContentEntry> = collections.pages.iter().collect();
        pages.sort_by_key(|e| e.order().unwrap_or(UNORDERED_PAGE));
        entries.extend(pages.into_iter().map(|page| {
            let priority = if page.featured() { 0.7 } else { 0.6 };
            self.entry(&format!("/{}", page.slug), priority, ChangeFreq::Monthly)
        }));

        entries.extend(
            template_pages(self.config.template)
                .iter()
                .map(|page| self.static_entry(page)),
        );

        entries.sort_by(|a, b| {
            b.effective_priority()
                .value()
                .total_cmp(&a.effective_priority().value())
        });

        debug!(
            "Built sitemap with {} URLs ({} services, {} pages)",
            entries.len(),
            collections.services.len(),
            collections.pages.len()
        );

        entries
    }

    fn static_entry(&self, page: &StaticRoute) -> SitemapUrlEntry {
        self.entry(page.path, page.priority, page.changefreq)
    }

    fn entry(&self, path: &str, priority: f64, changefreq: ChangeFreq) -> SitemapUrlEntry {
        SitemapUrlEntry {
            url: absolute_url(&self.config.site_url, path),
            lastmod: Some(self.lastmod.format("%Y-%m-%d").to_string()),
            changefreq: Some(changefreq),
            priority: Some(Priority::new(priority)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vitrine_content::{PageData, ServiceData};

    fn config(template: TemplateKind) -> SiteConfig {
        SiteConfig {
            site_url: "https://example.ch".to_string(),
            template,
            ..Default::default()
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn service(slug: &str, featured: bool) -> ContentEntry {
        ContentEntry::service(
            slug,
            ServiceData {
                title: slug.to_string(),
                description: "D".to_string(),
                featured,
                ..Default::default()
            },
        )
    }

    fn page(slug: &str, order: Option<i32>, featured: bool) -> ContentEntry {
        ContentEntry::page(
            slug,
            PageData {
                title: slug.to_string(),
                description: "D".to_string(),
                order,
                featured,
                ..Default::default()
            },
        )
    }

    fn urls(entries: &[SitemapUrlEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.url.as_str()).collect()
    }

    #[test]
    fn empty_collections_give_static_and_template_pages() {
        for kind in TemplateKind::ALL {
            let config = config(kind);
            let entries = SitemapBuilder::new(&config).build(&Collections::new());

            assert_eq!(entries.len(), 4 + template_pages(kind).len(), "{kind}");
        }
    }

    #[test]
    fn therapist_order_with_ties() {
        let config = config(TemplateKind::Therapist);
        let entries = SitemapBuilder::new(&config)
            .with_date(date())
            .build(&Collections::new());

        assert_eq!(
            urls(&entries),
            vec![
                "https://example.ch/",
                "https://example.ch/services",
                "https://example.ch/contact",
                "https://example.ch/booking",
                "https://example.ch/about",
                "https://example.ch/testimonials",
            ]
        );
    }

    #[test]
    fn services_and_pages_are_placed_by_priority() {
        let config = config(TemplateKind::Consultant);
        let mut collections = Collections::new();
        collections.services.push(service("reiki", false));
        collections.services.push(service("massage", true));
        collections.pages.push(page("faq", None, false));
        collections.pages.push(page("equipe", Some(1), false));
        collections.pages.push(page("tarifs", Some(2), true));

        let entries = SitemapBuilder::new(&config)
            .with_date(date())
            .build(&collections);

        assert_eq!(
            urls(&entries),
            vec![
                "https://example.ch/",
                "https://example.ch/services",
                "https://example.ch/services/massage",
                "https://example.ch/contact",
                "https://example.ch/services/reiki",
                "https://example.ch/about",
                "https://example.ch/tarifs",
                "https://example.ch/equipe",
                "https://example.ch/faq",
            ]
        );
    }

    #[test]
    fn sorted_descending_and_in_range() {
        let config = config(TemplateKind::Ecommerce);
        let mut collections = Collections::new();
        collections.services.push(service("a", true));
        collections.pages.push(page("b", Some(3), false));

        let entries = SitemapBuilder::new(&config).build(&collections);

        for pair in entries.windows(2) {
            assert!(pair[0].effective_priority() >= pair[1].effective_priority());
        }
        for entry in &entries {
            let priority = entry.effective_priority().value();
            assert!((0.0..=1.0).contains(&priority));
        }
    }

    #[test]
    fn stamps_lastmod_and_changefreq() {
        let config = config(TemplateKind::Ecommerce);
        let entries = SitemapBuilder::new(&config)
            .with_date(date())
            .build(&Collections::new());

        assert!(entries
            .iter()
            .all(|e| e.lastmod.as_deref() == Some("2024-03-15")));

        let shop = entries
            .iter()
            .find(|e| e.url == "https://example.ch/shop")
            .unwrap();
        assert_eq!(shop.changefreq, Some(ChangeFreq::Daily));

        let cart = entries
            .iter()
            .find(|e| e.url == "https://example.ch/cart")
            .unwrap();
        assert_eq!(cart.changefreq, Some(ChangeFreq::Never));
        assert_eq!(cart.priority, Some(Priority::new(0.3)));
    }

    #[test]
    fn nested_slugs_keep_their_path() {
        let config = config(TemplateKind::Consultant);
        let mut collections = Collections::new();
        collections.services.push(service("massage/suedois", false));

        let entries = SitemapBuilder::new(&config).build(&collections);

        assert!(urls(&entries).contains(&"https://example.ch/services/massage/suedois"));
    }
}
