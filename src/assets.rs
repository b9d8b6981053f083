//! Embedded assets with an optional filesystem config override
//!
//! - The form page template and its static files are always embedded.
//! - `config.yaml` is embedded; if `CONFIG_FILE` points at an existing file,
//!   that file is used instead.

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Static files served under /static
#[derive(RustEmbed)]
#[folder = "static/"]
#[include = "**/*.js"]
#[include = "**/*.css"]
struct EmbeddedStatic;

/// Tera templates for server-rendered pages
#[derive(RustEmbed)]
#[folder = "templates/"]
#[include = "*.html"]
struct EmbeddedTemplates;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// A static file ready to serve
pub struct StaticAsset {
    pub data: Cow<'static, [u8]>,
    pub content_type: &'static str,
}

/// Asset loader with an optional external config file
pub struct AssetLoader {
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// `config_file` should be `Some` only if CONFIG_FILE was set
    pub fn new(config_file: Option<PathBuf>) -> Self {
        Self { config_file }
    }

    pub fn config_file(&self) -> Option<&PathBuf> {
        self.config_file.as_ref()
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
            tracing::warn!(path = %path.display(), "CONFIG_FILE not found, using embedded config");
        }

        EmbeddedConfig::get("config.yaml")
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
            })
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Read an embedded template as a UTF-8 string
    pub fn read_template(&self, name: &str) -> io::Result<String> {
        let file = EmbeddedTemplates::get(name).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("Template not found: {name}"))
        })?;
        String::from_utf8(file.data.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Look up an embedded static file by its path below /static
    pub fn static_asset(&self, path: &str) -> Option<StaticAsset> {
        EmbeddedStatic::get(path.trim_start_matches('/')).map(|f| StaticAsset {
            data: f.data,
            content_type: content_type_for(path),
        })
    }

    /// Embedded static file names, sorted
    pub fn list_static() -> Vec<String> {
        let mut files: Vec<String> = EmbeddedStatic::iter().map(|s| s.to_string()).collect();
        files.sort();
        files
    }
}

fn content_type_for(path: &str) -> &'static str {
    match path.rsplit_once('.').map(|(_, ext)| ext) {
        Some("js") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        _ => "application/octet-stream",
    }
}
