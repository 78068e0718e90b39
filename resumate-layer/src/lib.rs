//! # Resumate Layers
//!
//! Built-in layers for Resumate.
//!
//! Currently implemented layers:
//! - `LoggingLayer`: Logs every chat completion with timing information
//!
//! ## Usage
//!
//! ```ignore
//! use resumate_core::Evaluator;
//! use resumate_layer::LoggingLayer;
//!
//! let evaluator = Evaluator::builder(client)
//!     .layer(LoggingLayer::new())
//!     .finish()?;
//! ```

pub mod logging;

// Re-exports
pub use logging::{LoggingLayer, LoggingProvider};
