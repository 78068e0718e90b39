//! # Resumate Core
//!
//! Core abstractions for scoring a resume against a job description with a
//! text generation model.
//!
//! This crate provides the provider trait, the prompt builder, the response
//! normalizer and the runtime that ties them together. Concrete backends
//! live in `resumate-provider`, middleware layers in `resumate-layer`.

pub mod config;
pub mod error;
pub mod evaluation;
pub mod layer;
pub mod normalize;
pub mod prompt;
pub mod provider;
pub mod rubric;
pub mod runtime;
pub mod types;

// Re-exports
pub use config::{ClientConfig, GenerationSettings, ProviderKind};
pub use error::EvalError;
pub use evaluation::{
    DimensionScore, Evaluation, EvaluationResult, OverallAssessment, RecommendedAction,
};
pub use layer::{ChatHook, Hooked, Layer};
pub use normalize::parse_response;
pub use prompt::PromptBuilder;
pub use provider::Provider;
pub use rubric::{Dimension, Rubric};
pub use runtime::Evaluator;
pub use types::*;

/// Result type alias for evaluation operations
pub type Result<T> = std::result::Result<T, EvalError>;
