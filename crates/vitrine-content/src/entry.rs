//! Content entries and collections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::frontmatter::{parse_yaml, split_frontmatter, FrontmatterError};

/// The content collection an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Services,
    Pages,
    Testimonials,
}

impl CollectionKind {
    /// All collections, in loading order.
    pub const ALL: [CollectionKind; 3] = [Self::Services, Self::Pages, Self::Testimonials];

    /// Directory and URL name of the collection.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Services => "services",
            Self::Pages => "pages",
            Self::Testimonials => "testimonials",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionKind {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "services" => Ok(Self::Services),
            "pages" => Ok(Self::Pages),
            "testimonials" => Ok(Self::Testimonials),
            other => Err(ContentError::UnknownCollection(other.to_string())),
        }
    }
}

/// Entry-level SEO override from front matter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoFields {
    #[serde(default, alias = "meta_title")]
    pub meta_title: Option<String>,

    #[serde(default, alias = "meta_description")]
    pub meta_description: Option<String>,

    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

/// Front matter of a `services` entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceData {
    pub title: String,

    pub description: String,

    /// Service family, e.g. `massage` or `energetic`
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub benefits: Vec<String>,

    #[serde(default)]
    pub featured: bool,

    /// Free-form price label such as `CHF 120.-`
    #[serde(default)]
    pub price: Option<String>,

    /// Free-form duration label such as `60 min`
    #[serde(default)]
    pub duration: Option<String>,

    #[serde(default)]
    pub seo: Option<SeoFields>,
}

/// Front matter of a `pages` entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageData {
    pub title: String,

    pub description: String,

    /// Position among pages (lower = first)
    #[serde(default)]
    pub order: Option<i32>,

    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    pub seo: Option<SeoFields>,
}

/// Front matter of a `testimonials` entry.
///
/// Testimonials carry no title or description of their own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestimonialData {
    #[serde(default)]
    pub author: Option<String>,

    /// Star rating; decimals and quoted numbers are accepted
    #[serde(default, deserialize_with = "lenient_rating")]
    pub rating: Option<f32>,

    /// Slug of the service the testimonial refers to
    #[serde(default)]
    pub service: Option<String>,
}

/// Reads a rating from a number or a numeric string.
///
/// Any other value is dropped with a warning so one bad field never
/// rejects the whole testimonial.
fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    let rating = match value {
        None | Some(serde_yaml::Value::Null) => None,
        Some(serde_yaml::Value::Number(n)) => n.as_f64().map(|n| n as f32),
        Some(serde_yaml::Value::String(s)) => match s.trim().parse::<f32>() {
            Ok(n) => Some(n),
            Err(_) => {
                tracing::warn!("Ignoring testimonial rating {s:?}: not a number");
                None
            }
        },
        Some(other) => {
            tracing::warn!("Ignoring testimonial rating {other:?}: not a number");
            None
        }
    };
    Ok(rating.filter(|n| n.is_finite()))
}

/// Collection-specific entry data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EntryData {
    Service(ServiceData),
    Page(PageData),
    Testimonial(TestimonialData),
}

/// A single item of a content collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentEntry {
    /// Entry identifier, derived from the file path
    pub slug: String,

    /// Parsed front matter
    pub data: EntryData,
}

impl ContentEntry {
    pub fn service(slug: impl Into<String>, data: ServiceData) -> Self {
        Self {
            slug: slug.into(),
            data: EntryData::Service(data),
        }
    }

    pub fn page(slug: impl Into<String>, data: PageData) -> Self {
        Self {
            slug: slug.into(),
            data: EntryData::Page(data),
        }
    }

    pub fn testimonial(slug: impl Into<String>, data: TestimonialData) -> Self {
        Self {
            slug: slug.into(),
            data: EntryData::Testimonial(data),
        }
    }

    /// Parse an entry of the given collection from a content file.
    ///
    /// Markdown sources must open with a front matter block, except testimonials
    /// which may be body-only.
    pub fn parse(
        collection: CollectionKind,
        slug: impl Into<String>,
        source: &str,
    ) -> Result<Self, ContentError> {
        let (yaml, _body) = split_frontmatter(source)?;
        Self::from_yaml(collection, slug, yaml)
    }

    /// Build an entry from a raw YAML data file (no body).
    pub fn parse_data(
        collection: CollectionKind,
        slug: impl Into<String>,
        yaml: &str,
    ) -> Result<Self, ContentError> {
        Self::from_yaml(collection, slug, Some(yaml))
    }

    fn from_yaml(
        collection: CollectionKind,
        slug: impl Into<String>,
        yaml: Option<&str>,
    ) -> Result<Self, ContentError> {
        let data = match (collection, yaml) {
            (CollectionKind::Services, Some(yaml)) => EntryData::Service(parse_yaml(yaml)?),
            (CollectionKind::Pages, Some(yaml)) => EntryData::Page(parse_yaml(yaml)?),
            (CollectionKind::Testimonials, Some(yaml)) if !yaml.is_empty() => {
                EntryData::Testimonial(parse_yaml(yaml)?)
            }
            (CollectionKind::Testimonials, _) => EntryData::Testimonial(TestimonialData::default()),
            (kind, None) => return Err(ContentError::MissingFrontmatter(kind)),
        };

        Ok(Self {
            slug: slug.into(),
            data,
        })
    }

    /// The collection this entry belongs to.
    pub fn collection(&self) -> CollectionKind {
        match self.data {
            EntryData::Service(_) => CollectionKind::Services,
            EntryData::Page(_) => CollectionKind::Pages,
            EntryData::Testimonial(_) => CollectionKind::Testimonials,
        }
    }

    /// Site path of the entry's page. Testimonials have no page of their own.
    pub fn route(&self) -> Option<String> {
        match self.collection() {
            CollectionKind::Services => Some(format!("/services/{}", self.slug)),
            CollectionKind::Pages => Some(format!("/{}", self.slug)),
            CollectionKind::Testimonials => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match &self.data {
            EntryData::Service(s) => Some(&s.title),
            EntryData::Page(p) => Some(&p.title),
            EntryData::Testimonial(_) => None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match &self.data {
            EntryData::Service(s) => Some(&s.description),
            EntryData::Page(p) => Some(&p.description),
            EntryData::Testimonial(_) => None,
        }
    }

    pub fn seo(&self) -> Option<&SeoFields> {
        match &self.data {
            EntryData::Service(s) => s.seo.as_ref(),
            EntryData::Page(p) => p.seo.as_ref(),
            EntryData::Testimonial(_) => None,
        }
    }

    pub fn category(&self) -> Option<&str> {
        match &self.data {
            EntryData::Service(s) => s.category.as_deref(),
            _ => None,
        }
    }

    pub fn benefits(&self) -> &[String] {
        match &self.data {
            EntryData::Service(s) => &s.benefits,
            _ => &[],
        }
    }

    pub fn featured(&self) -> bool {
        match &self.data {
            EntryData::Service(s) => s.featured,
            EntryData::Page(p) => p.featured,
            EntryData::Testimonial(_) => false,
        }
    }

    pub fn order(&self) -> Option<i32> {
        match &self.data {
            EntryData::Page(p) => p.order,
            _ => None,
        }
    }

    pub fn as_service(&self) -> Option<&ServiceData> {
        match &self.data {
            EntryData::Service(s) => Some(s),
            _ => None,
        }
    }
}

/// The content collections of a site.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Collections {
    pub services: Vec<ContentEntry>,
    pub pages: Vec<ContentEntry>,
    pub testimonials: Vec<ContentEntry>,
}

impl Collections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries of a single collection.
    pub fn get(&self, kind: CollectionKind) -> &[ContentEntry] {
        match kind {
            CollectionKind::Services => &self.services,
            CollectionKind::Pages => &self.pages,
            CollectionKind::Testimonials => &self.testimonials,
        }
    }

    /// Look up an entry by collection and slug.
    pub fn find(&self, kind: CollectionKind, slug: &str) -> Option<&ContentEntry> {
        self.get(kind).iter().find(|e| e.slug == slug)
    }

    /// Add an entry to the collection matching its data.
    pub fn push(&mut self, entry: ContentEntry) {
        match entry.collection() {
            CollectionKind::Services => self.services.push(entry),
            CollectionKind::Pages => self.pages.push(entry),
            CollectionKind::Testimonials => self.testimonials.push(entry),
        }
    }

    /// Total number of entries across all collections.
    pub fn len(&self) -> usize {
        self.services.len() + self.pages.len() + self.testimonials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Errors that can occur when parsing or loading content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] FrontmatterError),

    #[error("Missing frontmatter in {0} entry")]
    MissingFrontmatter(CollectionKind),

    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}
