//! High-level sitemap facade bundling the site config.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use vitrine_content::Collections;
use vitrine_seo::SiteConfig;

use crate::builder::SitemapBuilder;
use crate::entry::{ChangeFreq, SitemapUrlEntry};
use crate::robots::robots_txt;
use crate::xml::to_xml;

/// Priority summary of a sitemap.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SitemapStats {
    pub total: usize,
    /// Priority >= 0.8
    pub high_priority: usize,
    /// 0.5 <= priority < 0.8
    pub medium_priority: usize,
    /// Priority < 0.5
    pub low_priority: usize,
    pub by_changefreq: BTreeMap<ChangeFreq, usize>,
}

/// Generates the sitemap and robots.txt of one site.
#[derive(Debug, Clone)]
pub struct SitemapGenerator {
    config: SiteConfig,
    lastmod: Option<NaiveDate>,
}

impl SitemapGenerator {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config,
            lastmod: None,
        }
    }

    /// Use a fixed `lastmod` date instead of today.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.lastmod = Some(date);
        self
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Priority-ordered URL entries for the given collections.
    pub fn generate_for_collections(&self, collections: &Collections) -> Vec<SitemapUrlEntry> {
        let builder = SitemapBuilder::new(&self.config);
        let builder = match self.lastmod {
            Some(date) => builder.with_date(date),
            None => builder,
        };
        builder.build(collections)
    }

    /// Complete sitemap.xml document.
    pub fn generate_xml(&self, collections: &Collections) -> String {
        to_xml(&self.generate_for_collections(collections))
    }

    pub fn generate_robots(&self) -> String {
        robots_txt(&self.config)
    }

    /// Count entries per priority band and per change frequency.
    pub fn stats(&self, entries: &[SitemapUrlEntry]) -> SitemapStats {
        let mut stats = SitemapStats {
            total: entries.len(),
            ..Default::default()
        };

        for entry in entries {
            let priority = entry.effective_priority().value();
            if priority >= 0.8 {
                stats.high_priority += 1;
            } else if priority >= 0.5 {
                stats.medium_priority += 1;
            } else {
                stats.low_priority += 1;
            }

            if let Some(changefreq) = entry.changefreq {
                *stats.by_changefreq.entry(changefreq).or_default() += 1;
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vitrine_content::{ContentEntry, ServiceData};
    use vitrine_seo::TemplateKind;

    fn generator(template: TemplateKind) -> SitemapGenerator {
        SitemapGenerator::new(SiteConfig {
            site_url: "https://example.ch".to_string(),
            template,
            ..Default::default()
        })
        .with_date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
    }

    #[test]
    fn stats_for_ecommerce() {
        let generator = generator(TemplateKind::Ecommerce);
        let entries = generator.generate_for_collections(&Collections::new());

        let stats = generator.stats(&entries);

        // /, /services, /contact, /shop | /about | /cart, /account
        assert_eq!(stats.total, 7);
        assert_eq!(stats.high_priority, 4);
        assert_eq!(stats.medium_priority, 1);
        assert_eq!(stats.low_priority, 2);
        assert_eq!(
            stats.by_changefreq,
            BTreeMap::from([
                (ChangeFreq::Daily, 1),
                (ChangeFreq::Weekly, 2),
                (ChangeFreq::Monthly, 3),
                (ChangeFreq::Never, 1),
            ])
        );
    }

    #[test]
    fn stats_of_empty_list() {
        let stats = generator(TemplateKind::Consultant).stats(&[]);
        assert_eq!(stats, SitemapStats::default());
    }

    #[test]
    fn stats_serialize_changefreq_names() {
        let generator = generator(TemplateKind::Consultant);
        let entries = generator.generate_for_collections(&Collections::new());

        let json = serde_json::to_value(generator.stats(&entries)).unwrap();

        assert_eq!(json["total"], 4);
        assert_eq!(json["by_changefreq"]["weekly"], 2);
        assert_eq!(json["by_changefreq"]["monthly"], 2);
    }

    #[test]
    fn xml_contains_service_urls() {
        let mut collections = Collections::new();
        collections.services.push(ContentEntry::service(
            "massage",
            ServiceData {
                title: "Massage".to_string(),
                description: "D".to_string(),
                ..Default::default()
            },
        ));

        let xml = generator(TemplateKind::Therapist).generate_xml(&collections);

        assert!(xml.contains("<loc>https://example.ch/services/massage</loc>"));
        assert!(xml.contains("<lastmod>2024-03-15</lastmod>"));
        assert_eq!(xml.matches("<url>").count(), 7);
    }

    #[test]
    fn robots_uses_config() {
        let robots = generator(TemplateKind::Restaurant).generate_robots();

        assert!(robots.contains("Sitemap: https://example.ch/sitemap.xml"));
        assert!(robots.contains("Allow: /menu"));
    }
}
