//! Initialize a site: config file and sample content.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Files created by `init`, relative to the project root.
const FILES: [(&str, &str); 5] = [
    ("site.toml", DEFAULT_CONFIG),
    ("src/content/services/massage-relaxant.md", DEFAULT_SERVICE),
    ("src/content/pages/a-propos.md", DEFAULT_PAGE),
    ("src/content/testimonials/marie.md", DEFAULT_TESTIMONIAL),
    ("public/images/og/.gitkeep", ""),
];

/// Run the init command in `root`.
///
/// Existing files are kept unless `yes` is set.
pub fn run(root: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing vitrine in {}...", root.display());

    for (relative, content) in FILES {
        let path = root.join(relative);

        if path.exists() && !yes {
            tracing::warn!("{} already exists. Use --yes to overwrite.", relative);
            continue;
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", relative))?;
        tracing::info!("Created {}", relative);
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'vitrine build' to generate sitemap.xml and robots.txt.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Vitrine configuration

[site]
business_name = "Cabinet Harmonie"
location = "Lausanne"
# Absolute origin of the deployed site
site_url = "https://example.ch"
# therapist, restaurant, ecommerce or consultant
template = "therapist"
# Leave empty to use the template keywords
default_keywords = []

[site.social]
# twitter = "@cabinet"

[content]
dir = "src/content"

[build]
output = "dist"
# Static assets, checked for Open Graph images
public = "public"

[server]
port = 4321
"#;

const DEFAULT_SERVICE: &str = r#"---
title: Massage relaxant
description: Un massage doux pour relâcher les tensions du quotidien.
category: massage
featured: true
price: CHF 120.-
duration: PT60M
benefits:
  - Réduit le stress et favorise un sommeil réparateur.
  - Soulage les tensions musculaires.
---

Un moment de détente dans un cadre calme.
"#;

const DEFAULT_PAGE: &str = r#"---
title: À propos
description: Notre cabinet et notre approche des soins naturels.
order: 1
---

Présentez votre cabinet ici.
"#;

const DEFAULT_TESTIMONIAL: &str = r#"---
author: Marie
rating: 5
service: massage-relaxant
---

Un moment hors du temps, je recommande vivement.
"#;
