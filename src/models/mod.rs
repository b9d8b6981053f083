pub mod artifact_name;
pub mod config;
pub mod page_layout;

pub use artifact_name::{ArtifactName, NAME_PREFIX};
pub use config::{AppConfig, ChromeConfig};
pub use page_layout::{Margins, PageLayout, PaperFormat};
