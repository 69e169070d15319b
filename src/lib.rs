//! Pupprinteer - HTML to PDF and image conversion
//!
//! Ships a headless Chrome inside the release archive and extracts it into
//! a shared cache on first use.

pub mod chrome;
pub mod cli;
pub mod config;
pub mod error;
pub mod ui;

pub use error::{PupprinteerError, PupprinteerResult};
