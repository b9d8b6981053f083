//! The rendering capability: HTML string in, PDF bytes out.

use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::browser::tab::Tab;
use headless_chrome::{Browser, LaunchOptions};

use crate::error::RenderError;
use crate::models::page_layout::mm_to_in;
use crate::models::{ChromeConfig, PageLayout};

/// Turns markup into a paginated PDF.
///
/// Implementations block; callers run them off the async executor.
pub trait PdfRenderer: Send + Sync {
    fn render(&self, html: &str, layout: &PageLayout) -> Result<Vec<u8>, RenderError>;
}

/// Renders through a headless Chrome launched for each call.
///
/// There is no session reuse: every render pays the browser startup cost,
/// and the process is torn down when the `Browser` handle drops.
pub struct ChromeRenderer {
    config: ChromeConfig,
}

impl ChromeRenderer {
    pub fn new(config: ChromeConfig) -> Self {
        Self { config }
    }

    fn launch(&self) -> Result<Browser, RenderError> {
        let launch_options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(self.config.sandbox)
            .path(self.config.path.clone())
            .idle_browser_timeout(self.config.idle_timeout())
            .build()
            .map_err(|e| RenderError::Launch(format!("invalid launch options: {e}")))?;

        Browser::new(launch_options).map_err(|e| RenderError::Launch(e.to_string()))
    }
}

impl PdfRenderer for ChromeRenderer {
    fn render(&self, html: &str, layout: &PageLayout) -> Result<Vec<u8>, RenderError> {
        let browser = self.launch()?;
        let tab = browser
            .new_tab()
            .map_err(|e| RenderError::Launch(format!("failed to open tab: {e}")))?;

        let result = set_content(&tab, html).and_then(|_| {
            tab.print_to_pdf(Some(print_options(layout)))
                .map_err(|e| RenderError::Export(e.to_string()))
        });

        // Released on every path; the browser process exits when `browser` drops.
        if let Err(e) = tab.close(false) {
            tracing::debug!(error = %e, "Failed to close tab");
        }

        result
    }
}

/// Replace the document of a blank page with `html` and wait for `load`.
///
/// The page stays on `about:blank`, so relative URLs in the markup have no
/// base to resolve against.
fn set_content(tab: &Tab, html: &str) -> Result<(), RenderError> {
    tab.navigate_to("about:blank")
        .and_then(|t| t.wait_until_navigated())
        .map_err(|e| RenderError::Load(format!("failed to open blank page: {e}")))?;

    let literal = serde_json::to_string(html).map_err(|e| RenderError::Load(e.to_string()))?;
    tab.evaluate(&content_script(&literal), true)
        .map_err(|e| RenderError::Load(e.to_string()))?;

    Ok(())
}

fn content_script(html_literal: &str) -> String {
    format!(
        r#"new Promise(function (resolve) {{
    document.open();
    document.write({html_literal});
    document.close();
    if (document.readyState === 'complete') {{
        resolve(true);
    }} else {{
        window.addEventListener('load', function () {{ resolve(true); }}, {{ once: true }});
    }}
}})"#
    )
}

/// Print options for `layout`. Chrome takes paper and margins in inches.
pub fn print_options(layout: &PageLayout) -> PrintToPdfOptions {
    let margins = &layout.margins;
    PrintToPdfOptions {
        paper_width: Some(layout.format.width_in()),
        paper_height: Some(layout.format.height_in()),
        margin_top: Some(mm_to_in(margins.top_mm)),
        margin_bottom: Some(mm_to_in(margins.bottom_mm)),
        margin_left: Some(mm_to_in(margins.left_mm)),
        margin_right: Some(mm_to_in(margins.right_mm)),
        print_background: Some(true),
        prefer_css_page_size: Some(false),
        ..Default::default()
    }
}
