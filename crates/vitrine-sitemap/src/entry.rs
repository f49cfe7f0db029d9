//! Sitemap URL records.

use std::fmt;

use serde::Serialize;

/// Sitemap `<changefreq>` hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub const ALL: [ChangeFreq; 7] = [
        Self::Always,
        Self::Hourly,
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Yearly,
        Self::Never,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sitemap `<priority>`, always within `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Priority(f64);

impl Priority {
    /// Priority crawlers assume when none is given.
    pub const DEFAULT: Priority = Priority(0.5);

    /// Clamp a value into `[0.0, 1.0]`; NaN becomes the default.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self::DEFAULT
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Formats with exactly one decimal, as written to the sitemap.
impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Single URL entry in the sitemap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapUrlEntry {
    /// Absolute URL, written as `<loc>`
    pub url: String,
    /// Last modification date, YYYY-MM-DD
    pub lastmod: Option<String>,
    pub changefreq: Option<ChangeFreq>,
    pub priority: Option<Priority>,
}

impl SitemapUrlEntry {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            lastmod: None,
            changefreq: None,
            priority: None,
        }
    }

    /// Effective priority used for ordering.
    pub fn effective_priority(&self) -> Priority {
        self.priority.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_is_clamped() {
        assert_eq!(Priority::new(1.7).value(), 1.0);
        assert_eq!(Priority::new(-0.2).value(), 0.0);
        assert_eq!(Priority::new(f64::NAN), Priority::DEFAULT);
        assert_eq!(Priority::new(0.8).value(), 0.8);
    }

    #[test]
    fn priority_formats_one_decimal() {
        assert_eq!(Priority::new(1.0).to_string(), "1.0");
        assert_eq!(Priority::new(0.85).to_string(), "0.8");
        assert_eq!(Priority::new(0.3).to_string(), "0.3");
    }

    #[test]
    fn entry_without_priority_uses_default() {
        let entry = SitemapUrlEntry::new("https://example.ch/");
        assert_eq!(entry.effective_priority(), Priority::DEFAULT);
    }
}
