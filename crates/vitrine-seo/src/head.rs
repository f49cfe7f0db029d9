//! `<head>` tag rendering for resolved metadata.

use minijinja::{context, AutoEscape, Environment};
use thiserror::Error;

use crate::config::SiteConfig;
use crate::resolver::ResolvedMetadata;

#[derive(Debug, Error)]
pub enum HeadError {
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Renders the meta tags of a page using minijinja.
pub struct HeadRenderer {
    env: Environment<'static>,
}

impl HeadRenderer {
    /// Create a renderer with the built-in head template.
    pub fn new() -> Self {
        let mut env = Environment::new();

        // Values are escaped explicitly with the `attr` filter.
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_filter("attr", escape_attr);

        env.add_template_owned("head.html".to_string(), HEAD_TEMPLATE.to_string())
            .expect("Failed to add head template");

        Self { env }
    }

    /// Render the `<head>` tags of a page.
    pub fn render(
        &self,
        meta: &ResolvedMetadata,
        config: &SiteConfig,
    ) -> Result<String, HeadError> {
        let tmpl = self.env.get_template("head.html")?;

        let json_ld = meta
            .structured_data
            .as_ref()
            .map(|data| data.to_string().replace("</", "<\\/"));

        let html = tmpl.render(context! {
            meta => meta,
            keywords => meta.keywords.join(", "),
            robots => meta.robots(),
            twitter_site => config.social.get("twitter"),
            json_ld => json_ld,
        })?;

        Ok(html)
    }
}

impl Default for HeadRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render head tags with a one-off [`HeadRenderer`].
pub fn render_head(meta: &ResolvedMetadata, config: &SiteConfig) -> Result<String, HeadError> {
    HeadRenderer::new().render(meta, config)
}

/// Escape a value for use in HTML text or a double-quoted attribute.
fn escape_attr(value: String) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const HEAD_TEMPLATE: &str = r##"<title>{{ meta.title | attr }}</title>
<meta name="description" content="{{ meta.description | attr }}">
{% if keywords %}<meta name="keywords" content="{{ keywords | attr }}">
{% endif %}<meta name="robots" content="{{ robots }}">
<link rel="canonical" href="{{ meta.canonical_url | attr }}">
<meta property="og:type" content="{{ meta.og_type | attr }}">
<meta property="og:title" content="{{ meta.og_title | attr }}">
<meta property="og:description" content="{{ meta.og_description | attr }}">
<meta property="og:url" content="{{ meta.open_graph.url | attr }}">
<meta property="og:site_name" content="{{ meta.open_graph.site_name | attr }}">
<meta property="og:locale" content="{{ meta.open_graph.locale | attr }}">
<meta property="og:image" content="{{ meta.open_graph.image.url | attr }}">
<meta property="og:image:width" content="{{ meta.open_graph.image.width }}">
<meta property="og:image:height" content="{{ meta.open_graph.image.height }}">
<meta property="og:image:alt" content="{{ meta.open_graph.image.alt | attr }}">
<meta name="twitter:card" content="summary_large_image">
{% if twitter_site %}<meta name="twitter:site" content="{{ twitter_site | attr }}">
{% endif %}<meta name="twitter:title" content="{{ meta.og_title | attr }}">
<meta name="twitter:description" content="{{ meta.og_description | attr }}">
<meta name="twitter:image" content="{{ meta.og_image | attr }}">
{% if json_ld %}<script type="application/ld+json">{{ json_ld }}</script>
{% endif %}"##;
