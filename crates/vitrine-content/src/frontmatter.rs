//! Front matter extraction and parsing.

use serde::de::DeserializeOwned;

/// Split a content file into its YAML front matter block and the remaining body.
///
/// Returns `None` for the front matter when the file does not open with `---`.
pub fn split_frontmatter(source: &str) -> Result<(Option<&str>, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    if !trimmed.starts_with("---") {
        return Ok((None, source));
    }

    // Find the closing ---
    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml_content = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    Ok((Some(yaml_content), remaining.trim_start()))
}

/// Deserialize a YAML block into typed front matter.
pub fn parse_yaml<T: DeserializeOwned>(yaml: &str) -> Result<T, FrontmatterError> {
    serde_yaml::from_str(yaml).map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))
}

/// Errors that can occur when parsing front matter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),
}
