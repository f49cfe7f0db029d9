//! schema.org JSON-LD for service pages.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{json, Value};
use vitrine_content::ServiceData;

use crate::config::SiteConfig;

/// Currency of extracted offer prices.
const PRICE_CURRENCY: &str = "CHF";

/// Build a schema.org `Service` object for a service entry.
///
/// `offers` is only present when the price label contains a number, `duration`
/// only when the entry has one.
pub fn service_schema(
    service: &ServiceData,
    description: &str,
    canonical_url: &str,
    config: &SiteConfig,
) -> Value {
    let mut schema = json!({
        "@context": "https://schema.org",
        "@type": "Service",
        "name": service.title,
        "description": description,
        "url": canonical_url,
        "provider": {
            "@type": config.template.template().business_type,
            "name": config.business_name,
            "url": config.site_url,
            "address": {
                "@type": "PostalAddress",
                "addressLocality": config.location,
                "addressCountry": "CH",
            },
        },
        "areaServed": config.location,
    });

    if let Some(category) = service.category.as_deref() {
        schema["serviceType"] = json!(category);
    }

    if let Some(price) = service.price.as_deref().and_then(extract_price) {
        schema["offers"] = json!({
            "@type": "Offer",
            "price": price,
            "priceCurrency": PRICE_CURRENCY,
        });
    }

    if let Some(duration) = service.duration.as_deref() {
        schema["duration"] = json!(duration);
    }

    schema
}

/// Numeric portion of a price label: `"CHF 120.-"` -> `"120"`.
///
/// Drops every character that is not a digit or a `.`/`,` separator, then trims
/// separators from both ends. Returns `None` when no digit is left.
pub fn extract_price(label: &str) -> Option<String> {
    static RE_NON_NUMERIC: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[^\d.,]").expect("valid price regex"));

    let stripped = RE_NON_NUMERIC.replace_all(label, "");
    let price = stripped.trim_matches(|c| c == '.' || c == ',');

    if price.chars().any(|c| c.is_ascii_digit()) {
        Some(price.to_string())
    } else {
        None
    }
}
