//! Collection loader.
//!
//! Reads `<content_dir>/<collection>/**` into [`Collections`]. Markdown files
//! (`.md`, `.mdx`) are parsed for front matter, YAML files (`.yaml`, `.yml`) are
//! taken as raw entry data. The slug is the path relative to the collection
//! directory, without extension.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::entry::{CollectionKind, Collections, ContentEntry, ContentError};

/// Load all collections found under `content_dir`.
///
/// Missing collection directories contribute zero entries.
pub fn load_collections(content_dir: &Path) -> Result<Collections, ContentError> {
    if !content_dir.exists() {
        return Err(ContentError::Read {
            path: content_dir.display().to_string(),
            message: "content directory not found".to_string(),
        });
    }

    let mut collections = Collections::new();

    for kind in CollectionKind::ALL {
        let dir = content_dir.join(kind.as_str());
        if !dir.is_dir() {
            tracing::debug!("No {} collection at {}", kind, dir.display());
            continue;
        }

        for entry in load_collection(kind, &dir)? {
            collections.push(entry);
        }
    }

    tracing::debug!(
        "Loaded {} services, {} pages, {} testimonials",
        collections.services.len(),
        collections.pages.len(),
        collections.testimonials.len()
    );

    Ok(collections)
}

/// Load the entries of a single collection directory, sorted by slug.
fn load_collection(kind: CollectionKind, dir: &Path) -> Result<Vec<ContentEntry>, ContentError> {
    let files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && source_format(p).is_some())
        .collect();

    let mut entries = files
        .par_iter()
        .map(|path| load_entry(kind, dir, path))
        .collect::<Result<Vec<_>, _>>()?;

    entries.sort_by(|a, b| a.slug.cmp(&b.slug));

    Ok(entries)
}

/// Read and parse one content file.
fn load_entry(kind: CollectionKind, dir: &Path, path: &Path) -> Result<ContentEntry, ContentError> {
    let source = fs::read_to_string(path).map_err(|e| ContentError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let slug = slug_for(dir, path);

    let parsed = match source_format(path) {
        Some(SourceFormat::Yaml) => ContentEntry::parse_data(kind, slug, &source),
        _ => ContentEntry::parse(kind, slug, &source),
    };

    parsed.map_err(|e| ContentError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceFormat {
    Markdown,
    Yaml,
}

fn source_format(path: &Path) -> Option<SourceFormat> {
    match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
        "md" | "mdx" => Some(SourceFormat::Markdown),
        "yaml" | "yml" => Some(SourceFormat::Yaml),
        _ => None,
    }
}

/// Derive a slug from a file path: `services/soins/reiki.md` -> `soins/reiki`.
fn slug_for(dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(dir).unwrap_or(path).with_extension("");

    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn loads_all_collections() {
        let temp = tempdir().unwrap();
        let content = temp.path();

        write(
            content,
            "services/reiki.md",
            "---\ntitle: Reiki\ndescription: Soin énergétique\ncategory: energetic\n---\n",
        );
        write(
            content,
            "services/massage.mdx",
            "---\ntitle: Massage\ndescription: Détente\nfeatured: true\n---\n# Massage",
        );
        write(
            content,
            "pages/a-propos.md",
            "---\ntitle: À propos\ndescription: Notre histoire\norder: 2\n---\n",
        );
        write(content, "testimonials/anne.yaml", "author: Anne\nrating: 5\n");
        write(content, "services/notes.txt", "ignored");

        let collections = load_collections(content).unwrap();

        assert_eq!(collections.services.len(), 2);
        assert_eq!(collections.services[0].slug, "massage");
        assert_eq!(collections.services[1].slug, "reiki");
        assert_eq!(collections.pages.len(), 1);
        assert_eq!(collections.pages[0].order(), Some(2));
        assert_eq!(collections.testimonials.len(), 1);
    }

    #[test]
    fn missing_collection_dirs_are_empty() {
        let temp = tempdir().unwrap();
        write(
            temp.path(),
            "pages/contact.md",
            "---\ntitle: Contact\ndescription: Nous écrire\n---\n",
        );

        let collections = load_collections(temp.path()).unwrap();

        assert!(collections.services.is_empty());
        assert!(collections.testimonials.is_empty());
        assert_eq!(collections.pages.len(), 1);
    }

    #[test]
    fn nested_files_get_path_slugs() {
        let temp = tempdir().unwrap();
        write(
            temp.path(),
            "services/soins/reiki.md",
            "---\ntitle: Reiki\ndescription: D\n---\n",
        );

        let collections = load_collections(temp.path()).unwrap();

        assert_eq!(collections.services[0].slug, "soins/reiki");
    }

    #[test]
    fn reports_malformed_file_path() {
        let temp = tempdir().unwrap();
        write(temp.path(), "services/broken.md", "---\ntitle: [oops\n---\n");

        let err = load_collections(temp.path()).unwrap_err();

        match err {
            ContentError::Parse { path, .. } => assert!(path.ends_with("broken.md")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn loose_testimonial_ratings_do_not_fail_the_load() {
        let temp = tempdir().unwrap();
        write(temp.path(), "testimonials/anne.yaml", "author: Anne\nrating: 4.5\n");
        write(temp.path(), "testimonials/paul.yaml", "author: Paul\nrating: \"5\"\n");
        write(temp.path(), "testimonials/zoe.yaml", "author: Zoé\nrating: top\n");

        let collections = load_collections(temp.path()).unwrap();

        assert_eq!(collections.testimonials.len(), 3);
    }

    #[test]
    fn errors_on_missing_content_dir() {
        let temp = tempdir().unwrap();

        let result = load_collections(&temp.path().join("nope"));

        assert!(matches!(result, Err(ContentError::Read { .. })));
    }
}
