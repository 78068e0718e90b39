//! # Resumate
//!
//! Score a resume against a job description with a text generation model.
//!
//! Resumate builds a rubric-based prompt, sends it to a hosted
//! OpenAI-compatible API or a local Ollama server, and hands back the raw
//! model output. [`parse_response`] then turns that output into JSON,
//! tolerating a fenced code block around it.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! resumate = "0.1"
//! ```
//!
//! ```ignore
//! use resumate::prelude::*;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::new("ollama").with_model("llama3.1:8b");
//!
//! let (raw, _prompt) = resumate::evaluate(
//!     "Senior backend engineer, Go, distributed systems",
//!     "5 years Go, built a distributed cache",
//!     &config,
//! )
//! .await?;
//!
//! match parse_response(&raw) {
//!     Some(value) => println!("overall: {}", value["overall"]["score"]),
//!     None => eprintln!("Model returned invalid JSON. Try lowering temperature or another model."),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: `providers` and `layers`
//! - `providers`: hosted and local chat backends
//! - `layers`: built-in layers (logging)
//! - `schema`: JSON Schema derives on [`EvaluationResult`]
//! - `full`: all of the above

// Re-export core types and traits
pub use resumate_core::*;

// Re-export providers under `provider` module
#[cfg(feature = "resumate-provider")]
pub mod provider {
    //! Chat backend implementations.
    pub use resumate_provider::*;
}

// Re-export layers under `layer` module
#[cfg(feature = "resumate-layer")]
pub mod layer {
    //! Built-in middleware layers.
    pub use resumate_layer::*;
}

/// Evaluate a resume against a job description.
///
/// Uses the default rubric and system instructions and logs each request.
/// Returns `(raw_response, prompt)`; the response is not parsed, so pass it
/// to [`parse_response`] afterwards. Configuration and transport failures
/// are returned unchanged.
#[cfg(all(feature = "resumate-provider", feature = "resumate-layer"))]
pub async fn evaluate(
    job_description: &str,
    resume_text: &str,
    config: &ClientConfig,
) -> Result<(String, String)> {
    let evaluator = Evaluator::builder(provider::ChatClient::new(config.clone()))
        .layer(layer::LoggingLayer::new())
        .settings(config.generation())
        .finish()?;

    let evaluation = evaluator.evaluate(job_description, resume_text).await?;
    Ok(evaluation.into())
}

/// Prelude module for convenient imports
pub mod prelude {
    //! Prelude module containing the most commonly used types and traits.
    //!
    //! ```
    //! use resumate::prelude::*;
    //! ```

    pub use crate::{
        parse_response, ClientConfig, EvalError, Evaluation, EvaluationResult, Evaluator, Layer,
        Message, PromptBuilder, Provider, Result, Role, Rubric,
    };

    #[cfg(feature = "resumate-provider")]
    pub use crate::provider::*;

    #[cfg(feature = "resumate-layer")]
    pub use crate::layer::*;
}

#[cfg(all(test, feature = "resumate-provider", feature = "resumate-layer"))]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer one request with a canned local-server reply.
    async fn local_server(reply: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut seen = Vec::new();
            let mut chunk = [0u8; 4096];
            // Drain the request: headers, then content-length bytes of body.
            loop {
                let n = socket.read(&mut chunk).await.unwrap_or(0);
                if n == 0 {
                    break;
                }
                seen.extend_from_slice(&chunk[..n]);
                let Some(end) = seen.windows(4).position(|w| w == b"\r\n\r\n") else {
                    continue;
                };
                let headers = String::from_utf8_lossy(&seen[..end]).to_ascii_lowercase();
                let length: usize = headers
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(0);
                if seen.len() >= end + 4 + length {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                reply.len(),
                reply
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        url
    }

    #[tokio::test]
    async fn test_evaluate_returns_raw_and_prompt() {
        let url = local_server(
            r#"{"message": {"role": "assistant", "content": "{\"overall\": {\"score\": 81}}"}}"#,
        )
        .await;
        let config = ClientConfig::new("ollama").with_host(url);

        let (raw, prompt) = evaluate(
            "Senior backend engineer, Go, distributed systems",
            "5 years Go, built a distributed cache",
            &config,
        )
        .await
        .unwrap();

        assert_eq!(raw, r#"{"overall": {"score": 81}}"#);
        assert!(prompt.contains("Senior backend engineer, Go, distributed systems"));
        assert!(prompt.contains("5 years Go, built a distributed cache"));
        assert_eq!(parse_response(&raw).unwrap()["overall"]["score"], 81);
    }

    #[tokio::test]
    async fn test_evaluate_unsupported_provider() {
        let config = ClientConfig::new("gemini");
        let err = evaluate("jd", "resume", &config).await.unwrap_err();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_evaluate_missing_key() {
        let config = ClientConfig::new("openai").with_api_key_env("RESUMATE_TEST_KEY_NEVER_SET");
        let err = evaluate("jd", "resume", &config).await.unwrap_err();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_evaluate_unreachable_local_server() {
        let config = ClientConfig::new("ollama").with_host("http://127.0.0.1:9");
        let err = evaluate("jd", "resume", &config).await.unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_parse_response_reexport() {
        let value = parse_response("```json\n{\"overall\": {\"score\": 70}}\n```").unwrap();
        assert_eq!(value["overall"]["score"].as_i64(), Some(70));
    }
}
