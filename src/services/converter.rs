//! The conversion pipeline behind `POST /generate-pdf`.
//!
//! `Received -> Rendering -> Writing -> Serving -> Done`, with any failure in
//! the first three steps ending the request. Nothing is retried.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::Instrument;

use crate::error::{ApiError, RenderError};
use crate::models::{ArtifactName, PageLayout};
use crate::services::{PdfRenderer, ScratchStorage};

/// A finished document ready to be sent
#[derive(Debug)]
pub struct RenderedPdf {
    /// `project_review_<timestamp>.pdf`
    pub download_name: String,
    pub bytes: Vec<u8>,
}

/// Runs one HTML document through the renderer and scratch storage
pub struct PdfConverter {
    renderer: Arc<dyn PdfRenderer>,
    storage: Arc<ScratchStorage>,
    permits: Arc<Semaphore>,
    render_timeout: Duration,
}

impl PdfConverter {
    pub fn new(
        renderer: Arc<dyn PdfRenderer>,
        storage: Arc<ScratchStorage>,
        max_concurrent_renders: usize,
        render_timeout: Duration,
    ) -> Self {
        Self {
            renderer,
            storage,
            permits: Arc::new(Semaphore::new(max_concurrent_renders.max(1))),
            render_timeout,
        }
    }

    /// Convert `html` into a PDF.
    ///
    /// The artifact written along the way is gone by the time this returns,
    /// whether it succeeded or not.
    pub async fn convert(&self, html: String) -> Result<RenderedPdf, ApiError> {
        let name = ArtifactName::now();
        let span = tracing::info_span!("convert", document = %name);

        async move {
            tracing::debug!(html_bytes = html.len(), "Received");

            tracing::debug!("Rendering");
            let pdf = self.render(html).await?;

            tracing::debug!(pdf_bytes = pdf.len(), "Writing");
            let artifact = self.storage.create(&name, &pdf).await?;
            drop(pdf);

            tracing::debug!("Serving");
            let bytes = artifact.read().await?;
            if let Err(e) = artifact.discard().await {
                tracing::warn!(error = %e, "Artifact cleanup failed");
            }

            tracing::info!(pdf_bytes = bytes.len(), "Done");
            Ok::<_, ApiError>(RenderedPdf {
                download_name: name.download_name(),
                bytes,
            })
        }
        .instrument(span)
        .await
    }

    /// Run the renderer on the blocking pool, holding a permit for as long as
    /// the browser runs
    async fn render(&self, html: String) -> Result<Vec<u8>, RenderError> {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| RenderError::TaskFailed(e.to_string()))?;

        let renderer = self.renderer.clone();
        let task = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            renderer.render(&html, &PageLayout::REVIEW)
        });

        let bytes = match tokio::time::timeout(self.render_timeout, task).await {
            Ok(joined) => joined.map_err(|e| RenderError::TaskFailed(e.to_string()))??,
            Err(_) => {
                tracing::warn!(timeout = ?self.render_timeout, "Render timed out");
                return Err(RenderError::Timeout(self.render_timeout));
            }
        };

        if bytes.is_empty() {
            return Err(RenderError::EmptyOutput);
        }
        Ok(bytes)
    }
}
