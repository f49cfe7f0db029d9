//! Sitemap statistics.

use std::path::Path;

use anyhow::{Context, Result};
use vitrine_sitemap::{SitemapGenerator, SitemapStats};

use crate::commands::build::load_site_collections;
use crate::config::{load_config, ConfigFile};

/// Run the stats command.
pub fn run(config_path: &Path, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let stats = collect(&config)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).context("Failed to serialize stats")?
        );
    } else {
        print!("{}", format_stats(&stats));
    }

    Ok(())
}

pub fn collect(config: &ConfigFile) -> Result<SitemapStats> {
    let collections = load_site_collections(&config.content_dir())?;
    let generator = SitemapGenerator::new(config.site.clone());
    let entries = generator.generate_for_collections(&collections);

    Ok(generator.stats(&entries))
}

fn format_stats(stats: &SitemapStats) -> String {
    let mut out = format!(
        "URLs:            {}\n\
         High priority:   {}\n\
         Medium priority: {}\n\
         Low priority:    {}\n",
        stats.total, stats.high_priority, stats.medium_priority, stats.low_priority
    );

    for (changefreq, count) in &stats.by_changefreq {
        out.push_str(&format!("  {:<14} {}\n", changefreq.as_str(), count));
    }

    out
}
