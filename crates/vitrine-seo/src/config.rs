//! Site-wide SEO configuration.
//!
//! Loaded once per process from the `[site]` table of `site.toml`. Every field has a
//! default so a partial or absent config still resolves; see [`SiteConfig::default`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Business category selecting the fixed SEO template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TemplateKind {
    #[default]
    Therapist,
    Restaurant,
    Ecommerce,
    Consultant,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 4] = [
        Self::Therapist,
        Self::Restaurant,
        Self::Ecommerce,
        Self::Consultant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Therapist => "therapist",
            Self::Restaurant => "restaurant",
            Self::Ecommerce => "ecommerce",
            Self::Consultant => "consultant",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "therapist" => Ok(Self::Therapist),
            "restaurant" => Ok(Self::Restaurant),
            "ecommerce" => Ok(Self::Ecommerce),
            "consultant" => Ok(Self::Consultant),
            other => Err(ConfigError::UnknownTemplate(other.to_string())),
        }
    }
}

// Unknown template names deserialize to the default template.
impl From<String> for TemplateKind {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|e| {
            tracing::warn!("{}, using {}", e, TemplateKind::default());
            TemplateKind::default()
        })
    }
}

/// Site-wide configuration shared by metadata resolution and sitemap generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub business_name: String,

    pub location: String,

    /// Absolute origin without trailing slash, e.g. `https://example.ch`
    #[serde(deserialize_with = "deserialize_site_url")]
    pub site_url: String,

    pub template: TemplateKind,

    /// Keywords used when nothing more specific applies.
    /// Empty means "use the template's keywords".
    #[serde(default)]
    pub default_keywords: Vec<String>,

    /// Platform name -> handle, e.g. `twitter = "@cabinet"`
    pub social: BTreeMap<String, String>,

    /// Provider name -> tracking id
    pub analytics: BTreeMap<String, String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let template = TemplateKind::default();
        Self {
            business_name: DEFAULT_BUSINESS_NAME.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            template,
            default_keywords: template.template().keywords(),
            social: BTreeMap::new(),
            analytics: BTreeMap::new(),
        }
    }
}

const DEFAULT_BUSINESS_NAME: &str = "Votre Entreprise";
const DEFAULT_LOCATION: &str = "Suisse";
const DEFAULT_SITE_URL: &str = "https://example.ch";

impl SiteConfig {
    /// Replace blank fields with the fallback values and strip the trailing slash
    /// of `site_url`.
    pub fn normalized(mut self) -> Self {
        if self.business_name.trim().is_empty() {
            self.business_name = DEFAULT_BUSINESS_NAME.to_string();
        }
        if self.location.trim().is_empty() {
            self.location = DEFAULT_LOCATION.to_string();
        }
        self.site_url = normalize_site_url(&self.site_url);
        if self.site_url.is_empty() {
            self.site_url = DEFAULT_SITE_URL.to_string();
        }
        if self.default_keywords.is_empty() {
            self.default_keywords = self.template.template().keywords();
        }
        self
    }

    /// Configured default keywords, or the template's when none are set.
    pub fn keywords(&self) -> Vec<String> {
        if self.default_keywords.is_empty() {
            self.template.template().keywords()
        } else {
            self.default_keywords.clone()
        }
    }

    /// Site URL with a trailing slash, the default canonical URL.
    pub fn home_url(&self) -> String {
        format!("{}/", self.site_url.trim_end_matches('/'))
    }
}

fn normalize_site_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn deserialize_site_url<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let url = String::deserialize(deserializer)?;
    Ok(normalize_site_url(&url))
}

/// Errors for explicit (non soft-fail) config parsing.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown template kind: {0}")]
    UnknownTemplate(String),
}
