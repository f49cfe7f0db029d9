//! Print the resolved metadata of one content entry.

use std::path::Path;

use anyhow::{Context, Result};
use vitrine_content::CollectionKind;
use vitrine_seo::{HeadRenderer, MetadataResolver};

use crate::commands::build::load_site_collections;
use crate::config::{load_config, ConfigFile};

/// Run the meta command.
pub fn run(config_path: &Path, collection: CollectionKind, slug: &str, html: bool) -> Result<()> {
    let config = load_config(config_path)?;
    println!("{}", render(&config, collection, slug, html)?);
    Ok(())
}

/// Metadata as pretty JSON, or as `<head>` tags when `html` is set.
pub fn render(config: &ConfigFile, collection: CollectionKind, slug: &str, html: bool) -> Result<String> {
    let collections = load_site_collections(&config.content_dir())?;

    let entry = collections
        .find(collection, slug)
        .with_context(|| format!("No {} entry named '{}'", collection, slug))?;

    let meta = MetadataResolver::new(&config.site).resolve_entry(entry);

    if html {
        HeadRenderer::new()
            .render(&meta, &config.site)
            .context("Failed to render head tags")
    } else {
        serde_json::to_string_pretty(&meta).context("Failed to serialize metadata")
    }
}
