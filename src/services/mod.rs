pub mod converter;
pub mod form_page;
pub mod renderer;
pub mod scratch;

pub use converter::{PdfConverter, RenderedPdf};
pub use form_page::{FormPage, TemplateError};
pub use renderer::{ChromeRenderer, PdfRenderer};
pub use scratch::{Artifact, ScratchStorage};
