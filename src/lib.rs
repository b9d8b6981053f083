//! Folio - HTML to PDF conversion server
//!
//! Accepts an HTML document over HTTP, renders it in headless Chrome, and
//! returns the PDF. This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
