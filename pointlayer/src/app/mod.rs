//! Application bootstrap and lifecycle.
//!
//! This module provides the `PointLayerApp` type, which owns the wiring the
//! original demo scattered across its shell: dataset generation, data
//! source construction, and composite layer assembly happen in one
//! validated, testable place.
//!
//! # Example
//!
//! ```ignore
//! use pointlayer::app::{AppConfig, PointLayerApp};
//!
//! let app = PointLayerApp::start(AppConfig::fast())?;
//! let layers = app.render(&viewport).await;
//! ```

mod bootstrap;
mod config;
mod error;

pub use bootstrap::PointLayerApp;
pub use config::{AppConfig, DatasetConfig, SourceConfig};
pub use error::AppError;
