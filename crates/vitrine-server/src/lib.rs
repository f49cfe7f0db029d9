//! SEO endpoint server for vitrine sites.
//!
//! Serves `sitemap.xml`, `robots.txt` and per-entry metadata as JSON, next to the
//! site's static files, and reloads content collections when their files change.

pub mod server;
pub mod watcher;

pub use server::{router, ServerConfig, ServerError, ServerState, SeoServer, SharedState};
pub use watcher::{FileWatcher, WatchEvent};
