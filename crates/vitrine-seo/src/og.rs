//! Open Graph image selection.

use vitrine_content::{CollectionKind, ContentEntry};

use crate::config::SiteConfig;

/// Open Graph image dimensions, in pixels.
pub const OG_IMAGE_WIDTH: u32 = 1200;
pub const OG_IMAGE_HEIGHT: u32 = 630;

/// Service category -> share image.
const CATEGORY_IMAGES: [(&str, &str); 4] = [
    ("massage", "/images/og/massage-therapy.jpg"),
    ("energetic", "/images/og/energy-healing.jpg"),
    ("movement", "/images/og/movement-therapy.jpg"),
    ("consultation", "/images/og/consultation.jpg"),
];

/// Image assets the serving origin must provide for share previews to resolve.
pub const REQUIRED_OG_IMAGES: [&str; 17] = [
    "/images/og/massage-therapy.jpg",
    "/images/og/energy-healing.jpg",
    "/images/og/movement-therapy.jpg",
    "/images/og/consultation.jpg",
    "/images/og/therapist-default.jpg",
    "/images/og/restaurant-default.jpg",
    "/images/og/ecommerce-default.jpg",
    "/images/og/consultant-default.jpg",
    "/images/og/home.jpg",
    "/images/og/services.jpg",
    "/images/og/about.jpg",
    "/images/og/contact.jpg",
    "/images/og/booking.jpg",
    "/images/og/testimonials.jpg",
    "/images/og/menu.jpg",
    "/images/og/events.jpg",
    "/images/og/shop.jpg",
];

/// Make a URL absolute by prefixing the site URL unless it already starts with `http`.
///
/// `("https://example.ch", "/images/og/x.jpg")` -> `https://example.ch/images/og/x.jpg`
pub fn absolute_url(site_url: &str, path: &str) -> String {
    if path.starts_with("http") {
        return path.to_string();
    }

    let base = site_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Share image of a service category, if the category is known.
pub fn category_image(category: &str) -> Option<&'static str> {
    CATEGORY_IMAGES
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, image)| *image)
}

/// Pick the Open Graph image and make it absolute.
///
/// Priority: explicit image, service category image, template default.
pub fn select_og_image(
    custom: Option<&str>,
    entry: Option<&ContentEntry>,
    config: &SiteConfig,
) -> String {
    let image = custom
        .filter(|c| !c.trim().is_empty())
        .or_else(|| {
            entry
                .filter(|e| e.collection() == CollectionKind::Services)
                .and_then(|e| e.category())
                .and_then(category_image)
        })
        .unwrap_or(config.template.template().default_og_image);

    absolute_url(&config.site_url, image)
}

/// Check an image reference.
///
/// Relative paths are assumed to exist on the serving origin; absolute references
/// must be http(s) URLs.
pub fn validate_og_image(image: &str) -> bool {
    image.starts_with('/') || image.starts_with("https://") || image.starts_with("http://")
}
