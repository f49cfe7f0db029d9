//! SEO endpoint server implementation.

use std::net::SocketAddr;
use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use vitrine_content::{load_collections, CollectionKind, Collections, ContentError};
use vitrine_seo::{MetadataResolver, SiteConfig};
use vitrine_sitemap::SitemapGenerator;

use crate::watcher::{FileWatcher, WatchEvent};

/// Configuration for the endpoint server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory containing the content collections
    pub content_dir: PathBuf,

    /// Directory of static files served for every other path
    pub public_dir: PathBuf,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("src/content"),
            public_dir: PathBuf::from("public"),
            port: 4321,
            host: "127.0.0.1".to_string(),
            open: false,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}: {1}")]
    InvalidAddress(String, String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("Content load task failed: {0}")]
    Task(String),
}

/// Shared server state.
#[derive(Debug)]
pub struct ServerState {
    pub site: SiteConfig,
    pub collections: Collections,
    pub content_dir: PathBuf,
}

impl ServerState {
    pub fn new(site: SiteConfig, collections: Collections, content_dir: PathBuf) -> Self {
        Self {
            site,
            collections,
            content_dir,
        }
    }

    fn generator(&self) -> SitemapGenerator {
        SitemapGenerator::new(self.site.clone())
    }
}

pub type SharedState = Arc<RwLock<ServerState>>;

/// SEO endpoint server.
pub struct SeoServer {
    config: ServerConfig,
    site: SiteConfig,
}

impl SeoServer {
    pub fn new(config: ServerConfig, site: SiteConfig) -> Self {
        Self { config, site }
    }

    /// Load content, then serve until the process is stopped.
    pub async fn start(self) -> Result<(), ServerError> {
        let host = format!("{}:{}", self.config.host, self.config.port);
        let addr: SocketAddr = host
            .parse()
            .map_err(|e: std::net::AddrParseError| ServerError::InvalidAddress(host, e.to_string()))?;

        let collections = load_content(self.config.content_dir.clone()).await?;
        tracing::info!("Loaded {} content entries", collections.len());

        let state = Arc::new(RwLock::new(ServerState::new(
            self.site,
            collections,
            self.config.content_dir.clone(),
        )));

        let root = watch_root(&self.config.content_dir);
        tracing::debug!("Watching {} for content changes", root.display());
        let (watcher, mut rx) =
            FileWatcher::new(&[root]).map_err(|e| ServerError::WatchError(e.to_string()))?;

        let state_clone = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&state_clone, event).await;
            }
            // Keep watcher alive
            drop(watcher);
        });

        let app = router(state, &self.config.public_dir);

        tracing::info!("Serving SEO endpoints at http://{}", addr);

        if self.config.open {
            let url = format!("http://{}/sitemap.xml", addr);
            let _ = open::that(&url);
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

/// Build the router over shared state.
///
/// Paths without an endpoint are served from `public_dir`. Any origin may read the
/// endpoints, so pages of a dev server on another port can fetch metadata.
pub fn router(state: SharedState, public_dir: &FsPath) -> Router {
    Router::new()
        .route("/sitemap.xml", get(sitemap_handler))
        .route("/robots.txt", get(robots_handler))
        .route("/api/sitemap/stats", get(stats_handler))
        .route("/api/meta/{collection}/{*slug}", get(meta_handler))
        .fallback_service(ServeDir::new(public_dir))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Load the collections under `content_dir` on the blocking pool.
///
/// A missing directory yields empty collections.
async fn load_content(content_dir: PathBuf) -> Result<Collections, ServerError> {
    let loaded = tokio::task::spawn_blocking(move || {
        if !content_dir.is_dir() {
            tracing::warn!(
                "Content directory {} not found, serving empty collections",
                content_dir.display()
            );
            return Ok(Collections::new());
        }
        load_collections(&content_dir)
    })
    .await
    .map_err(|e| ServerError::Task(e.to_string()))?;

    Ok(loaded?)
}

/// Nearest existing directory at or above `content_dir`.
///
/// Watching it lets a content directory created after startup be picked up.
fn watch_root(content_dir: &FsPath) -> PathBuf {
    content_dir
        .ancestors()
        .filter(|p| !p.as_os_str().is_empty())
        .find(|p| p.is_dir())
        .map(FsPath::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Reload the collections after a content change.
///
/// A failed reload keeps the previously loaded collections.
async fn handle_watch_event(state: &SharedState, event: WatchEvent) {
    tracing::info!("Content changed: {}", event.path().display());

    let content_dir = state.read().await.content_dir.clone();

    match load_content(content_dir).await {
        Ok(collections) => {
            tracing::info!("Reloaded {} content entries", collections.len());
            state.write().await.collections = collections;
        }
        Err(e) => tracing::warn!("Failed to reload content: {}", e),
    }
}

async fn sitemap_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    let xml = state.generator().generate_xml(&state.collections);

    ([(header::CONTENT_TYPE, "application/xml")], xml)
}

async fn robots_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    let robots = state.generator().generate_robots();

    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], robots)
}

async fn stats_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    let generator = state.generator();
    let entries = generator.generate_for_collections(&state.collections);

    Json(generator.stats(&entries))
}

/// Resolved metadata of one content entry, as JSON.
async fn meta_handler(
    State(state): State<SharedState>,
    Path((collection, slug)): Path<(String, String)>,
) -> Response {
    let Ok(kind) = collection.parse::<CollectionKind>() else {
        return (
            StatusCode::NOT_FOUND,
            format!("Unknown collection: {collection}"),
        )
            .into_response();
    };

    let state = state.read().await;
    let Some(entry) = state.collections.find(kind, &slug) else {
        return (
            StatusCode::NOT_FOUND,
            format!("No {kind} entry named {slug}"),
        )
            .into_response();
    };

    let meta = MetadataResolver::new(&state.site).resolve_entry(entry);
    Json(meta).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::fs;
    use tempfile::tempdir;
    use tower::ServiceExt;
    use vitrine_content::{ContentEntry, ServiceData};
    use vitrine_seo::TemplateKind;

    fn site() -> SiteConfig {
        SiteConfig {
            business_name: "Cabinet Harmonie".to_string(),
            location: "Lausanne".to_string(),
            site_url: "https://harmonie.ch".to_string(),
            template: TemplateKind::Therapist,
            ..Default::default()
        }
    }

    fn state(content_dir: PathBuf) -> SharedState {
        let mut collections = Collections::new();
        collections.push(ContentEntry::service(
            "massage",
            ServiceData {
                title: "Massage".to_string(),
                description: "Un moment de détente.".to_string(),
                category: Some("massage".to_string()),
                ..Default::default()
            },
        ));

        Arc::new(RwLock::new(ServerState::new(site(), collections, content_dir)))
    }

    async fn request(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn creates_server_with_default_config() {
        let server = SeoServer::new(ServerConfig::default(), site());
        assert_eq!(server.config.port, 4321);
        assert_eq!(server.config.content_dir, PathBuf::from("src/content"));
    }

    #[tokio::test]
    async fn serves_sitemap() {
        let temp = tempdir().unwrap();
        let app = router(state(temp.path().to_path_buf()), temp.path());

        let (status, content_type, body) = request(app, "/sitemap.xml").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/xml"));
        assert!(body.contains("<loc>https://harmonie.ch/services/massage</loc>"));
    }

    #[tokio::test]
    async fn serves_robots() {
        let temp = tempdir().unwrap();
        let app = router(state(temp.path().to_path_buf()), temp.path());

        let (status, content_type, body) = request(app, "/robots.txt").await;

        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/plain"));
        assert!(body.contains("Sitemap: https://harmonie.ch/sitemap.xml"));
    }

    #[tokio::test]
    async fn serves_entry_metadata() {
        let temp = tempdir().unwrap();
        let app = router(state(temp.path().to_path_buf()), temp.path());

        let (status, _, body) = request(app, "/api/meta/services/massage").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["canonical_url"], "https://harmonie.ch/services/massage");
        assert_eq!(
            json["og_image"],
            "https://harmonie.ch/images/og/massage-therapy.jpg"
        );
        assert_eq!(json["structured_data"]["@type"], "Service");
    }

    #[tokio::test]
    async fn unknown_entries_are_not_found() {
        let temp = tempdir().unwrap();
        let state = state(temp.path().to_path_buf());

        let (status, _, _) = request(router(state.clone(), temp.path()), "/api/meta/services/reiki").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, _) = request(router(state, temp.path()), "/api/meta/booking/massage").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn serves_stats() {
        let temp = tempdir().unwrap();
        let app = router(state(temp.path().to_path_buf()), temp.path());

        let (status, _, body) = request(app, "/api/sitemap/stats").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        // 4 static pages, 2 therapist pages, 1 service
        assert_eq!(json["total"], 7);
    }

    #[tokio::test]
    async fn falls_back_to_static_files() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("hello.txt"), "bonjour").unwrap();
        let app = router(state(temp.path().to_path_buf()), temp.path());

        let (status, _, body) = request(app, "/hello.txt").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "bonjour");
    }

    #[tokio::test]
    async fn reloads_collections_on_change() {
        let temp = tempdir().unwrap();
        let services = temp.path().join("services");
        fs::create_dir_all(&services).unwrap();
        let file = services.join("reiki.md");
        fs::write(&file, "---\ntitle: Reiki\ndescription: Énergie\n---\n").unwrap();

        let state = state(temp.path().to_path_buf());
        handle_watch_event(&state, WatchEvent::ContentChanged(file)).await;

        let state = state.read().await;
        assert_eq!(state.collections.services.len(), 1);
        assert_eq!(state.collections.services[0].slug, "reiki");
    }

    #[tokio::test]
    async fn failed_reload_keeps_collections() {
        let temp = tempdir().unwrap();
        let services = temp.path().join("services");
        fs::create_dir_all(&services).unwrap();
        let file = services.join("broken.md");
        fs::write(&file, "---\ntitle: [oops\n---\n").unwrap();

        let state = state(temp.path().to_path_buf());
        handle_watch_event(&state, WatchEvent::ContentChanged(file)).await;

        let state = state.read().await;
        assert_eq!(state.collections.services.len(), 1);
        assert_eq!(state.collections.services[0].slug, "massage");
    }

    #[tokio::test]
    async fn missing_content_dir_loads_empty_collections() {
        let temp = tempdir().unwrap();

        let collections = load_content(temp.path().join("src/content")).await.unwrap();

        assert!(collections.is_empty());
    }

    #[tokio::test]
    async fn content_created_after_startup_is_reloaded() {
        let temp = tempdir().unwrap();
        let content_dir = temp.path().join("content");
        let state = Arc::new(RwLock::new(ServerState::new(
            site(),
            Collections::new(),
            content_dir.clone(),
        )));

        let services = content_dir.join("services");
        fs::create_dir_all(&services).unwrap();
        let file = services.join("reiki.md");
        fs::write(&file, "---\ntitle: Reiki\ndescription: Énergie\n---\n").unwrap();
        handle_watch_event(&state, WatchEvent::ContentChanged(file)).await;

        assert_eq!(state.read().await.collections.services.len(), 1);
    }

    #[test]
    fn watch_root_is_nearest_existing_dir() {
        let temp = tempdir().unwrap();
        let content_dir = temp.path().join("src/content");

        assert_eq!(watch_root(&content_dir), temp.path());

        fs::create_dir_all(&content_dir).unwrap();
        assert_eq!(watch_root(&content_dir), content_dir);

        assert_eq!(watch_root(FsPath::new("missing/content")), PathBuf::from("."));
    }

    #[tokio::test]
    async fn starts_without_content_dir() {
        let temp = tempdir().unwrap();
        let config = ServerConfig {
            content_dir: temp.path().join("src/content"),
            public_dir: temp.path().to_path_buf(),
            port: 0,
            ..Default::default()
        };

        let started = tokio::time::timeout(
            std::time::Duration::from_millis(300),
            SeoServer::new(config, site()).start(),
        )
        .await;

        // Still serving when the timeout fires
        assert!(started.is_err(), "server exited early: {started:?}");
    }
}
