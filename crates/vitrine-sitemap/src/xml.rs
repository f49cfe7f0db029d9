//! sitemap.xml serialization.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.ch/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```

use crate::entry::SitemapUrlEntry;

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Serialize entries to a sitemap document, in the given order.
pub fn to_xml(entries: &[SitemapUrlEntry]) -> String {
    let mut xml = String::with_capacity(256 + entries.len() * 160);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
    xml.push('\n');

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.url)));
        if let Some(lastmod) = &entry.lastmod {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", escape_xml(lastmod)));
        }
        if let Some(changefreq) = entry.changefreq {
            xml.push_str(&format!("    <changefreq>{changefreq}</changefreq>\n"));
        }
        if let Some(priority) = entry.priority {
            xml.push_str(&format!("    <priority>{priority}</priority>\n"));
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{ChangeFreq, Priority};
    use pretty_assertions::assert_eq;
    use quick_xml::events::Event;
    use quick_xml::Reader;

    /// `(loc, lastmod, changefreq, priority)` of every `<url>`.
    type ParsedUrl = (String, Option<String>, Option<String>, Option<String>);

    fn parse(xml: &str) -> Vec<ParsedUrl> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut urls = Vec::new();
        let mut current: Option<ParsedUrl> = None;
        let mut tag = String::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    if tag == "url" {
                        current = Some((String::new(), None, None, None));
                    }
                }
                Ok(Event::Text(t)) => {
                    let text = String::from_utf8_lossy(&t).into_owned();
                    if let Some(url) = current.as_mut() {
                        match tag.as_str() {
                            "loc" => url.0 = text,
                            "lastmod" => url.1 = Some(text),
                            "changefreq" => url.2 = Some(text),
                            "priority" => url.3 = Some(text),
                            _ => {}
                        }
                    }
                }
                Ok(Event::End(e)) => {
                    if e.name().as_ref() == b"url" {
                        urls.extend(current.take());
                    }
                    tag.clear();
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("invalid sitemap XML: {e:?}"),
            }
        }

        urls
    }

    fn full_entry(loc: &str, changefreq: ChangeFreq, priority: f64) -> SitemapUrlEntry {
        SitemapUrlEntry {
            url: loc.to_string(),
            lastmod: Some("2024-03-15".to_string()),
            changefreq: Some(changefreq),
            priority: Some(Priority::new(priority)),
        }
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn empty_sitemap() {
        let xml = to_xml(&[]);

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        assert!(xml.contains("</urlset>"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn omits_unset_fields() {
        let xml = to_xml(&[SitemapUrlEntry::new("https://example.ch/")]);

        assert!(xml.contains("<loc>https://example.ch/</loc>"));
        assert!(!xml.contains("<lastmod>"));
        assert!(!xml.contains("<changefreq>"));
        assert!(!xml.contains("<priority>"));
    }

    #[test]
    fn escapes_locations() {
        let xml = to_xml(&[SitemapUrlEntry::new("https://example.ch/?a=1&b=<2>")]);

        assert!(xml.contains("<loc>https://example.ch/?a=1&amp;b=&lt;2&gt;</loc>"));
    }

    #[test]
    fn round_trips_through_a_parser() {
        let entries = vec![
            full_entry("https://example.ch/", ChangeFreq::Weekly, 1.0),
            full_entry("https://example.ch/services/massage", ChangeFreq::Monthly, 0.9),
            full_entry("https://example.ch/cart", ChangeFreq::Never, 0.3),
        ];

        let parsed = parse(&to_xml(&entries));

        assert_eq!(
            parsed,
            vec![
                (
                    "https://example.ch/".to_string(),
                    Some("2024-03-15".to_string()),
                    Some("weekly".to_string()),
                    Some("1.0".to_string()),
                ),
                (
                    "https://example.ch/services/massage".to_string(),
                    Some("2024-03-15".to_string()),
                    Some("monthly".to_string()),
                    Some("0.9".to_string()),
                ),
                (
                    "https://example.ch/cart".to_string(),
                    Some("2024-03-15".to_string()),
                    Some("never".to_string()),
                    Some("0.3".to_string()),
                ),
            ]
        );
    }
}
