//! Content collections for vitrine sites.
//!
//! This crate models the entries of the `services`, `pages` and `testimonials`
//! collections, parses their YAML front matter and loads whole collections from
//! a content directory.

pub mod entry;
pub mod frontmatter;
pub mod loader;

pub use entry::{
    CollectionKind, Collections, ContentEntry, ContentError, EntryData, PageData, SeoFields,
    ServiceData, TestimonialData,
};
pub use frontmatter::{split_frontmatter, FrontmatterError};
pub use loader::load_collections;
