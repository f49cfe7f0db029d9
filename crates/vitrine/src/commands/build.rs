//! Build command: sitemap.xml, robots.txt and the metadata index.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use vitrine_content::{load_collections, Collections};
use vitrine_seo::{MetadataResolver, ResolvedMetadata, SiteConfig, REQUIRED_OG_IMAGES};
use vitrine_sitemap::SitemapGenerator;

use crate::config::{load_config, ConfigFile};

/// Summary of one build.
#[derive(Debug)]
pub struct BuildReport {
    pub urls: usize,
    pub entries: usize,
    pub missing_images: Vec<&'static str>,
    pub output_dir: PathBuf,
}

/// Run the build command.
pub fn run(config_path: &Path, output: Option<PathBuf>, date: Option<NaiveDate>) -> Result<()> {
    tracing::info!("Building SEO files...");

    let config = load_config(config_path)?;
    let report = build(&config, output, date)?;

    tracing::info!(
        "Wrote {} sitemap URLs and metadata for {} entries",
        report.urls,
        report.entries
    );
    if !report.missing_images.is_empty() {
        tracing::warn!(
            "{} of {} Open Graph images are missing from {}",
            report.missing_images.len(),
            REQUIRED_OG_IMAGES.len(),
            config.public_dir().display()
        );
    }
    tracing::info!("Output: {}", report.output_dir.display());

    Ok(())
}

pub fn build(
    config: &ConfigFile,
    output: Option<PathBuf>,
    date: Option<NaiveDate>,
) -> Result<BuildReport> {
    let output_dir = output.unwrap_or_else(|| config.output_dir());
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let collections = load_site_collections(&config.content_dir())?;

    let mut generator = SitemapGenerator::new(config.site.clone());
    if let Some(date) = date {
        generator = generator.with_date(date);
    }

    let urls = generator.generate_for_collections(&collections);
    write(&output_dir.join("sitemap.xml"), &vitrine_sitemap::to_xml(&urls))?;
    write(&output_dir.join("robots.txt"), &generator.generate_robots())?;

    let index = metadata_index(&config.site, &collections);
    let json = serde_json::to_string_pretty(&index).context("Failed to serialize metadata")?;
    write(&output_dir.join("seo-index.json"), &json)?;

    let missing_images = missing_og_images(&config.public_dir());

    Ok(BuildReport {
        urls: urls.len(),
        entries: index.len(),
        missing_images,
        output_dir,
    })
}

/// Load the collections, treating a missing content directory as empty.
pub fn load_site_collections(content_dir: &Path) -> Result<Collections> {
    if !content_dir.exists() {
        tracing::warn!(
            "Content directory {} not found, building without collections",
            content_dir.display()
        );
        return Ok(Collections::new());
    }

    load_collections(content_dir)
        .with_context(|| format!("Failed to load content from {}", content_dir.display()))
}

/// Route -> metadata of every content entry that has its own page.
fn metadata_index(site: &SiteConfig, collections: &Collections) -> BTreeMap<String, ResolvedMetadata> {
    let resolver = MetadataResolver::new(site);

    collections
        .services
        .iter()
        .chain(&collections.pages)
        .filter_map(|entry| Some((entry.route()?, resolver.resolve_entry(entry))))
        .collect()
}

/// Required share images absent from the public directory.
fn missing_og_images(public_dir: &Path) -> Vec<&'static str> {
    let missing: Vec<&'static str> = REQUIRED_OG_IMAGES
        .iter()
        .copied()
        .filter(|image| !public_dir.join(image.trim_start_matches('/')).exists())
        .collect();

    for image in &missing {
        tracing::debug!("Missing Open Graph image: {}{}", public_dir.display(), image);
    }

    missing
}

fn write(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}
