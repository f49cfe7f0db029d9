//! Sitemap and robots.txt generation.
//!
//! Builds a priority-ordered list of sitemap URLs from fixed static pages, the
//! `services` and `pages` content collections and template-specific pages, and
//! serializes it to `sitemap.xml`. Also produces the matching `robots.txt`.

pub mod builder;
pub mod entry;
pub mod generator;
pub mod robots;
pub mod xml;

pub use builder::SitemapBuilder;
pub use entry::{ChangeFreq, Priority, SitemapUrlEntry};
pub use generator::{SitemapGenerator, SitemapStats};
pub use robots::robots_txt;
pub use xml::to_xml;
