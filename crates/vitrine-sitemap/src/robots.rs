//! robots.txt generation.

use vitrine_seo::{SiteConfig, TemplateKind};

/// Paths crawlers should stay out of.
const DISALLOWED: [&str; 4] = ["/api/", "/_astro/", "/admin/", "/.well-known/"];

/// Paths explicitly allowed for a business category.
fn allowed_paths(kind: TemplateKind) -> &'static [&'static str] {
    match kind {
        TemplateKind::Therapist => &["/services/", "/booking"],
        TemplateKind::Restaurant => &["/menu", "/reservations", "/events"],
        TemplateKind::Ecommerce => &["/shop/", "/products/"],
        TemplateKind::Consultant => &["/services/"],
    }
}

/// Render the robots.txt of a site.
pub fn robots_txt(config: &SiteConfig) -> String {
    let mut out = String::from("User-agent: *\nAllow: /\n");

    for path in allowed_paths(config.template) {
        out.push_str(&format!("Allow: {path}\n"));
    }

    out.push_str(&format!(
        "\nSitemap: {}/sitemap.xml\n",
        config.site_url.trim_end_matches('/')
    ));
    out.push_str("\nCrawl-delay: 1\n\n");

    for path in DISALLOWED {
        out.push_str(&format!("Disallow: {path}\n"));
    }

    out
}
