//! SEO metadata for vitrine sites.
//!
//! Resolves the `<head>` metadata of a page from a manual title and description,
//! an optional content entry, an optional manual override and the site config.
//! Resolution never fails: every field degrades to a French-language default.

pub mod config;
pub mod head;
pub mod og;
pub mod resolver;
pub mod structured;
pub mod templates;

pub use config::{ConfigError, SiteConfig, TemplateKind};
pub use head::{render_head, HeadError, HeadRenderer};
pub use og::{absolute_url, select_og_image, validate_og_image, REQUIRED_OG_IMAGES};
pub use resolver::{
    resolve_metadata, MetadataRequest, MetadataResolver, OgImage, OpenGraph, ResolvedMetadata,
    SeoOverride,
};
pub use structured::{extract_price, service_schema};
pub use templates::{render_pattern, SeoTemplate};
