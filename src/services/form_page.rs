use tera::{Context, Tera};

use crate::assets::AssetLoader;

const FORM_TEMPLATE: &str = "form.html";

/// Error type for template rendering
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template error: {0}")]
    Tera(#[from] tera::Error),

    #[error("Failed to read template: {0}")]
    Io(#[from] std::io::Error),
}

/// The review form served at `/`
pub struct FormPage {
    tera: Tera,
}

impl FormPage {
    pub fn new(loader: &AssetLoader) -> Result<Self, TemplateError> {
        let source = loader.read_template(FORM_TEMPLATE)?;

        let mut tera = Tera::default();
        tera.add_raw_template(FORM_TEMPLATE, &source)?;

        tracing::debug!(template = FORM_TEMPLATE, "Form page template loaded");
        Ok(Self { tera })
    }

    pub fn render(&self) -> Result<String, TemplateError> {
        let mut context = Context::new();
        context.insert("version", env!("CARGO_PKG_VERSION"));
        context.insert("endpoint", "/generate-pdf");
        context.insert("name_prefix", crate::models::NAME_PREFIX);

        Ok(self.tera.render(FORM_TEMPLATE, &context)?)
    }
}
