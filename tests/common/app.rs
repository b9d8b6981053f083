//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

use folio::assets::AssetLoader;
use folio::models::AppConfig;
use folio::server::{build_router, create_app_state_with_renderer, AppState};
use folio::services::PdfRenderer;

use super::fixtures::EchoRenderer;

/// Test application with router and a private scratch directory
pub struct TestApp {
    router: axum::Router,
    pub state: AppState,
    scratch: TempDir,
}

impl TestApp {
    /// Create a test application with the echo renderer
    pub fn new() -> Self {
        Self::with_renderer(Arc::new(EchoRenderer::new()))
    }

    /// Create a test application around a specific renderer
    pub fn with_renderer(renderer: Arc<dyn PdfRenderer>) -> Self {
        Self::with_config(renderer, |_| {})
    }

    /// Create a test application, adjusting the config before startup
    pub fn with_config(
        renderer: Arc<dyn PdfRenderer>,
        adjust: impl FnOnce(&mut AppConfig),
    ) -> Self {
        let scratch = TempDir::new().expect("Failed to create scratch dir");

        let mut config = AppConfig {
            scratch_dir: Some(scratch.path().to_path_buf()),
            ..Default::default()
        };
        adjust(&mut config);

        let asset_loader = Arc::new(AssetLoader::new(None));
        let state = create_app_state_with_renderer(asset_loader, &config, renderer)
            .expect("Failed to create app state");
        let router = build_router(state.clone());

        Self {
            router,
            state,
            scratch,
        }
    }

    /// Router for tests that serve over a real socket
    pub fn router(&self) -> axum::Router {
        self.router.clone()
    }

    pub fn scratch_dir(&self) -> &Path {
        self.scratch.path()
    }

    /// Files currently in the scratch directory
    pub fn scratch_files(&self) -> Vec<String> {
        std::fs::read_dir(self.scratch.path())
            .expect("Failed to read scratch dir")
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect()
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Make a POST request with an arbitrary content type
    pub async fn post_raw(&self, path: &str, content_type: &str, body: &str) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", content_type)
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Check if response body starts with the PDF signature
    pub fn is_pdf(&self) -> bool {
        self.body.starts_with(b"%PDF-")
    }
}

/// Wait long enough for the wall clock to tick into a new second
pub async fn next_second() {
    tokio::time::sleep(Duration::from_millis(1100)).await;
}
