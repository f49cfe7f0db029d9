//! Page metadata resolution.
//!
//! Metadata comes from up to three sources, first match wins:
//!
//! 1. a manual [`SeoOverride`] with a title,
//! 2. a content entry (its own `seo` block, else generated from the entry),
//! 3. the bare page title and description.
//!
//! Later sources are only consulted for fields the winning source leaves out, and
//! every textual field ends in a non-empty default.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use vitrine_content::{CollectionKind, ContentEntry};

use crate::config::SiteConfig;
use crate::og::{absolute_url, select_og_image, OG_IMAGE_HEIGHT, OG_IMAGE_WIDTH};
use crate::structured::service_schema;
use crate::templates::{render_pattern, SeoTemplate};

/// Open Graph locale of every page.
const OG_LOCALE: &str = "fr_CH";

/// Manual metadata override for a page.
///
/// Takes precedence over content entries when `title` is set. `og_image` and
/// `noindex` apply whichever source wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoOverride {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub noindex: Option<bool>,
}

/// Inputs of one resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataRequest<'a> {
    /// Last-resort title
    pub page_title: &'a str,
    pub page_description: Option<&'a str>,
    pub entry: Option<&'a ContentEntry>,
    pub custom: Option<&'a SeoOverride>,
    /// Defaults to the site home URL
    pub canonical_url: Option<&'a str>,
}

impl<'a> MetadataRequest<'a> {
    pub fn new(page_title: &'a str) -> Self {
        Self {
            page_title,
            ..Default::default()
        }
    }

    pub fn description(mut self, description: &'a str) -> Self {
        self.page_description = Some(description);
        self
    }

    pub fn entry(mut self, entry: &'a ContentEntry) -> Self {
        self.entry = Some(entry);
        self
    }

    pub fn custom(mut self, custom: &'a SeoOverride) -> Self {
        self.custom = Some(custom);
        self
    }

    pub fn canonical(mut self, url: &'a str) -> Self {
        self.canonical_url = Some(url);
        self
    }
}

/// The share image block of Open Graph metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

/// Open Graph metadata, as emitted in `og:*` tags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenGraph {
    #[serde(rename = "type")]
    pub og_type: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: String,
    pub locale: String,
    pub image: OgImage,
}

/// Final metadata of a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedMetadata {
    pub title: String,
    pub description: String,
    /// Insertion ordered, duplicates kept
    pub keywords: Vec<String>,
    pub og_title: String,
    pub og_description: String,
    pub og_image: String,
    pub og_type: String,
    pub open_graph: OpenGraph,
    pub canonical_url: String,
    pub noindex: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<Value>,
}

impl ResolvedMetadata {
    /// Content of the robots meta tag.
    pub fn robots(&self) -> &'static str {
        if self.noindex {
            "noindex, nofollow"
        } else {
            "index, follow"
        }
    }
}

/// Resolves page metadata against one site config.
#[derive(Debug, Clone, Copy)]
pub struct MetadataResolver<'c> {
    config: &'c SiteConfig,
}

impl<'c> MetadataResolver<'c> {
    pub fn new(config: &'c SiteConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SiteConfig {
        self.config
    }

    /// Resolve the metadata of a content entry's own page.
    ///
    /// The entry title (or slug) is the page title and its route the canonical URL.
    pub fn resolve_entry(&self, entry: &ContentEntry) -> ResolvedMetadata {
        let route = entry.route();
        let title = entry.title().unwrap_or(&entry.slug);

        let mut req = MetadataRequest::new(title).entry(entry);
        if let Some(route) = route.as_deref() {
            req = req.canonical(route);
        }

        self.resolve(&req)
    }

    /// Resolve the metadata of one page.
    pub fn resolve(&self, req: &MetadataRequest<'_>) -> ResolvedMetadata {
        let config = self.config;
        let template = config.template.template();

        let custom = req.custom.filter(|c| non_empty(c.title.as_deref()).is_some());

        let resolved = if let Some(custom) = custom {
            tracing::debug!("Resolving '{}' from manual override", req.page_title);
            self.from_override(req, custom)
        } else if let Some(entry) = req.entry {
            tracing::debug!(
                "Resolving '{}' from {} entry {}",
                req.page_title,
                entry.collection(),
                entry.slug
            );
            self.from_entry(req, entry, template)
        } else {
            tracing::debug!("Resolving '{}' from page fallback", req.page_title);
            Resolved {
                title: self.fallback_title(req),
                description: self.fallback_description(req),
                keywords: config.keywords(),
                from_entry: false,
            }
        };

        let canonical_url = non_empty(req.canonical_url)
            .map(|url| absolute_url(&config.site_url, url))
            .unwrap_or_else(|| config.home_url());

        let og_type = match req.entry.map(ContentEntry::collection) {
            Some(CollectionKind::Services) => "article",
            _ => "website",
        };

        let og_title = non_empty(req.custom.and_then(|c| c.og_title.as_deref()))
            .map(str::to_string)
            .unwrap_or_else(|| resolved.title.clone());
        let og_description = non_empty(req.custom.and_then(|c| c.og_description.as_deref()))
            .map(str::to_string)
            .unwrap_or_else(|| resolved.description.clone());
        let og_image = select_og_image(
            req.custom.and_then(|c| c.og_image.as_deref()),
            req.entry,
            config,
        );

        let structured_data = if resolved.from_entry {
            req.entry
                .and_then(ContentEntry::as_service)
                .map(|service| service_schema(service, &resolved.description, &canonical_url, config))
        } else {
            None
        };

        let open_graph = OpenGraph {
            og_type: og_type.to_string(),
            title: og_title.clone(),
            description: og_description.clone(),
            url: canonical_url.clone(),
            site_name: config.business_name.clone(),
            locale: OG_LOCALE.to_string(),
            image: OgImage {
                url: og_image.clone(),
                width: OG_IMAGE_WIDTH,
                height: OG_IMAGE_HEIGHT,
                alt: format!("Image de partage pour {}", resolved.title),
            },
        };

        ResolvedMetadata {
            title: resolved.title,
            description: resolved.description,
            keywords: resolved.keywords,
            og_title,
            og_description,
            og_image,
            og_type: og_type.to_string(),
            open_graph,
            canonical_url,
            noindex: req.custom.and_then(|c| c.noindex).unwrap_or(false),
            structured_data,
        }
    }

    fn from_override(&self, req: &MetadataRequest<'_>, custom: &SeoOverride) -> Resolved {
        Resolved {
            title: non_empty(custom.title.as_deref())
                .map(str::to_string)
                .unwrap_or_else(|| self.fallback_title(req)),
            description: non_empty(custom.description.as_deref())
                .map(str::to_string)
                .unwrap_or_else(|| self.fallback_description(req)),
            keywords: custom
                .keywords
                .clone()
                .filter(|k| !k.is_empty())
                .unwrap_or_else(|| self.config.keywords()),
            from_entry: false,
        }
    }

    fn from_entry(
        &self,
        req: &MetadataRequest<'_>,
        entry: &ContentEntry,
        template: &SeoTemplate,
    ) -> Resolved {
        let seo = entry.seo();

        let title = non_empty(seo.and_then(|s| s.meta_title.as_deref()))
            .map(str::to_string)
            .or_else(|| self.entry_title(entry, template))
            .unwrap_or_else(|| self.fallback_title(req));

        let description = non_empty(seo.and_then(|s| s.meta_description.as_deref()))
            .map(str::to_string)
            .or_else(|| self.entry_description(entry, template))
            .unwrap_or_else(|| self.fallback_description(req));

        let keywords = seo
            .and_then(|s| s.keywords.clone())
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| self.entry_keywords(entry, template));

        Resolved {
            title,
            description,
            keywords,
            from_entry: true,
        }
    }

    /// `entry.title + suffix`, with `{businessName}` substituted in the suffix.
    fn entry_title(&self, entry: &ContentEntry, template: &SeoTemplate) -> Option<String> {
        let title = non_empty(entry.title())?;
        let suffix = render_pattern(
            template.title_suffix,
            &[("businessName", &self.config.business_name)],
        );
        Some(format!("{title}{suffix}"))
    }

    /// Template description when the entry lists benefits, else the entry description.
    fn entry_description(&self, entry: &ContentEntry, template: &SeoTemplate) -> Option<String> {
        let description = non_empty(entry.description());

        match (entry.title(), entry.benefits().first()) {
            (Some(title), Some(benefit)) if !title.trim().is_empty() => {
                let service = title.to_lowercase();
                let benefit = benefit.trim().trim_end_matches('.');
                let details = match description {
                    Some(description) => format!("{description} {benefit}."),
                    None => format!("{benefit}."),
                };
                Some(render_pattern(
                    template.description_template,
                    &[
                        ("service", &service),
                        ("description", &details),
                        ("businessName", &self.config.business_name),
                        ("location", &self.config.location),
                    ],
                ))
            }
            _ => description.map(str::to_string),
        }
    }

    /// Template keywords, category keywords, then location keywords.
    fn entry_keywords(&self, entry: &ContentEntry, template: &SeoTemplate) -> Vec<String> {
        let mut keywords = template.keywords();
        let category = entry.category();

        match category {
            Some("massage") => {
                keywords.push("massage thérapeutique".to_string());
                keywords.push("soin corporel".to_string());
                if let Some(title) = entry.title() {
                    keywords.push(title.to_lowercase());
                }
            }
            Some("energetic") => {
                keywords.extend(["énergie", "chakras", "harmonisation"].map(String::from));
            }
            _ => {}
        }

        let location = self.config.location.to_lowercase();
        let location_keyword = format!("{location} {}", category.unwrap_or("service"));
        keywords.push(location);
        keywords.push(location_keyword);

        keywords
    }

    fn fallback_title(&self, req: &MetadataRequest<'_>) -> String {
        non_empty(Some(req.page_title))
            .or_else(|| non_empty(Some(self.config.business_name.as_str())))
            .unwrap_or(DEFAULT_TITLE)
            .to_string()
    }

    fn fallback_description(&self, req: &MetadataRequest<'_>) -> String {
        non_empty(req.page_description)
            .map(str::to_string)
            .unwrap_or_else(|| self.default_description())
    }

    fn default_description(&self) -> String {
        let name = non_empty(Some(self.config.business_name.as_str())).unwrap_or(DEFAULT_TITLE);
        match non_empty(Some(self.config.location.as_str())) {
            Some(location) => format!("Découvrez {name} à {location}."),
            None => format!("Découvrez {name}."),
        }
    }
}

const DEFAULT_TITLE: &str = "Votre Entreprise";

/// Resolve with an optional config, falling back to [`SiteConfig::default`].
pub fn resolve_metadata(req: &MetadataRequest<'_>, config: Option<&SiteConfig>) -> ResolvedMetadata {
    match config {
        Some(config) => MetadataResolver::new(config).resolve(req),
        None => {
            let fallback = SiteConfig::default();
            MetadataResolver::new(&fallback).resolve(req)
        }
    }
}

/// Title, description and keywords chosen by the cascade.
struct Resolved {
    title: String,
    description: String,
    keywords: Vec<String>,
    /// Whether a content entry won the cascade
    from_entry: bool,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
