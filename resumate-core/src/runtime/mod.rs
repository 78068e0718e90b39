//! Runtime layer.
//!
//! The runtime sits between the caller-facing `evaluate` call and the
//! low-level provider interface (`chat_completion`). It is responsible for:
//! - turning a job description and resume into system and user messages
//! - attaching the generation settings and JSON response format
//! - extracting the first choice text from the provider response

pub mod evaluator;

pub use evaluator::{Evaluator, EvaluatorBuilder};
