//! Test fixtures: stand-in renderers and request bodies.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use folio::error::RenderError;
use folio::models::PageLayout;
use folio::services::PdfRenderer;

/// Smallest useful PDF: one blank A4 page.
pub const BLANK_A4_PDF: &[u8] = b"%PDF-1.4
1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj
2 0 obj << /Type /Pages /Kids [3 0 R] /Count 1 >> endobj
3 0 obj << /Type /Page /Parent 2 0 R /MediaBox [0 0 595.28 841.89] >> endobj
trailer << /Root 1 0 R >>
%%EOF
";

/// Returns a fixed blank page and appends the markup as a PDF comment so
/// tests can tell responses apart.
pub struct EchoRenderer {
    pub calls: AtomicUsize,
}

impl EchoRenderer {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

impl PdfRenderer for EchoRenderer {
    fn render(&self, html: &str, layout: &PageLayout) -> Result<Vec<u8>, RenderError> {
        assert_eq!(*layout, PageLayout::REVIEW);
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut pdf = BLANK_A4_PDF.to_vec();
        pdf.extend_from_slice(format!("% {}\n", html.replace('\n', " ")).as_bytes());
        Ok(pdf)
    }
}

/// Fails like a machine without Chrome
pub struct BrokenRenderer;

impl PdfRenderer for BrokenRenderer {
    fn render(&self, _html: &str, _layout: &PageLayout) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::Launch("Could not auto detect a chrome executable".into()))
    }
}

/// Never finishes within any reasonable test timeout
pub struct HangingRenderer(pub Duration);

impl PdfRenderer for HangingRenderer {
    fn render(&self, _html: &str, _layout: &PageLayout) -> Result<Vec<u8>, RenderError> {
        std::thread::sleep(self.0);
        Ok(BLANK_A4_PDF.to_vec())
    }
}

/// JSON body for `/generate-pdf`
pub fn convert_body(html: &str) -> String {
    serde_json::json!({ "html": html }).to_string()
}

pub const HELLO_HTML: &str = "<h1>Hi</h1>";

pub const REVIEW_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><style>body { font-family: Arial, sans-serif; }</style></head>
<body>
<h1>Project Review Report</h1>
<table><tr><th>Total Tests</th><th>Passed</th></tr><tr><td>10</td><td>10</td></tr></table>
</body>
</html>"#;
