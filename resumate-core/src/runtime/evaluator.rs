//! Evaluator implementation.
//!
//! The Evaluator builds the prompt for a job description and resume, sends
//! it through a provider and hands back the raw model output together with
//! the prompt text.

use crate::config::GenerationSettings;
use crate::error::EvalError;
use crate::evaluation::Evaluation;
use crate::layer::Layer;
use crate::prompt::PromptBuilder;
use crate::provider::Provider;
use crate::rubric::Rubric;
use crate::types::*;
use std::sync::Arc;

/// Type-erased provider that can be shared across threads
type BoxedProvider = Arc<dyn Provider>;

/// Builder for an [`Evaluator`].
///
/// Layers wrap the provider with static dispatch while building; the
/// finished evaluator holds a single type-erased provider.
///
/// # Example
///
/// ```ignore
/// let evaluator = Evaluator::builder(ChatClient::new(config.clone()))
///     .layer(LoggingLayer::new())
///     .settings(config.generation())
///     .finish()?;
/// ```
pub struct EvaluatorBuilder<P> {
    provider: P,
    rubric: Rubric,
    system_instructions: Option<String>,
    settings: GenerationSettings,
}

impl<P: Provider> EvaluatorBuilder<P> {
    /// Create a new builder with a provider
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            rubric: Rubric::default(),
            system_instructions: None,
            settings: GenerationSettings::default(),
        }
    }

    /// Add a layer to wrap the provider
    pub fn layer<L>(self, layer: L) -> EvaluatorBuilder<L::Wrapped>
    where
        L: Layer<P>,
    {
        EvaluatorBuilder {
            provider: layer.layer(self.provider),
            rubric: self.rubric,
            system_instructions: self.system_instructions,
            settings: self.settings,
        }
    }

    /// Score against a custom rubric
    pub fn rubric(mut self, rubric: Rubric) -> Self {
        self.rubric = rubric;
        self
    }

    /// Replace the default system instructions
    pub fn system_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.system_instructions = Some(instructions.into());
        self
    }

    /// Set model, temperature and output token budget
    pub fn settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Finish building and create an Evaluator
    pub fn finish(self) -> Result<Evaluator, EvalError> {
        let mut prompt = PromptBuilder::new(self.rubric)?;
        if let Some(instructions) = self.system_instructions {
            prompt = prompt.with_system_instructions(instructions);
        }

        Ok(Evaluator {
            provider: Arc::new(self.provider),
            prompt,
            settings: self.settings,
        })
    }
}

/// Scores resumes against job descriptions through a provider.
///
/// Every call is independent: nothing from a previous evaluation is kept.
pub struct Evaluator {
    provider: BoxedProvider,
    prompt: PromptBuilder,
    settings: GenerationSettings,
}

impl Evaluator {
    /// Create a new builder
    pub fn builder<P: Provider>(provider: P) -> EvaluatorBuilder<P> {
        EvaluatorBuilder::new(provider)
    }

    /// Get provider information
    pub fn info(&self) -> Arc<ProviderInfo> {
        self.provider.info()
    }

    pub fn prompt_builder(&self) -> &PromptBuilder {
        &self.prompt
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Evaluate a resume against a job description.
    ///
    /// Returns the raw model output and the user prompt. The output is not
    /// parsed here; configuration and transport failures propagate as-is.
    pub async fn evaluate(
        &self,
        job_description: &str,
        resume_text: &str,
    ) -> Result<Evaluation, EvalError> {
        let prompt = self.prompt.build(job_description, resume_text);
        let messages = vec![
            Message::system(self.prompt.system_instructions()),
            Message::user(prompt.as_str()),
        ];

        let req = ChatCompletionRequest::new(self.settings.model.as_str(), messages)
            .with_temperature(self.settings.temperature)
            .with_max_tokens(self.settings.max_output_tokens)
            .with_response_format(ResponseFormat::JsonObject)
            .with_stream(false);

        let response = self.provider.chat_completion(req).await?;

        let raw_response = response
            .first_text()
            .ok_or_else(|| EvalError::provider("No choices in response"))?
            .to_string();

        Ok(Evaluation {
            raw_response,
            prompt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::EvaluationResult;
    use crate::normalize::parse_response;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct StubProvider {
        reply: Option<String>,
        requests: Mutex<Vec<ChatCompletionRequest>>,
    }

    impl StubProvider {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(reply.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn silent() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Provider for StubProvider {
        fn info(&self) -> Arc<ProviderInfo> {
            Arc::new(ProviderInfo {
                id: "stub".to_string(),
                name: "Stub".to_string(),
            })
        }

        async fn chat_completion(
            &self,
            req: ChatCompletionRequest,
        ) -> Result<ChatCompletionResponse, EvalError> {
            let model = req.model.clone();
            self.requests.lock().unwrap().push(req);

            let choices = self
                .reply
                .iter()
                .map(|text| Choice {
                    index: 0,
                    message: Message::assistant(text.as_str()),
                    finish_reason: FinishReason::Stop,
                })
                .collect();

            Ok(ChatCompletionResponse {
                id: "stub-1".to_string(),
                model,
                choices,
                usage: Usage::default(),
                created: None,
            })
        }
    }

    #[derive(Debug)]
    struct FailingProvider;

    #[async_trait]
    impl Provider for FailingProvider {
        fn info(&self) -> Arc<ProviderInfo> {
            Arc::new(ProviderInfo {
                id: "failing".to_string(),
                name: "Failing".to_string(),
            })
        }

        async fn chat_completion(
            &self,
            _req: ChatCompletionRequest,
        ) -> Result<ChatCompletionResponse, EvalError> {
            Err(EvalError::status(500, "internal error"))
        }
    }

    const WELL_FORMED: &str = r#"{
        "dimensions": [
            {"name": "Alignment", "score": 4, "evidence": "Backend role match"},
            {"name": "Skills Match", "score": 5, "evidence": "Go"},
            {"name": "Experience Level", "score": 4, "evidence": "5 years"},
            {"name": "Keywords", "score": 4, "evidence": "distributed"},
            {"name": "Clarity", "score": 3, "evidence": "Short resume"}
        ],
        "overall": {"score": 81, "recommended_action": "strong_consider", "summary": "Good fit"},
        "suggested_improvements": ["Add metrics"]
    }"#;

    #[tokio::test]
    async fn test_evaluate_sends_settings_and_messages() {
        let stub = StubProvider::replying("{}");
        let evaluator = Evaluator::builder(stub.clone())
            .settings(GenerationSettings {
                model: "llama3.1:8b".to_string(),
                temperature: 0.1,
                max_output_tokens: 256,
            })
            .system_instructions("Be strict.")
            .finish()
            .unwrap();

        let evaluation = evaluator.evaluate("the jd", "the resume").await.unwrap();
        assert_eq!(evaluation.raw_response, "{}");

        let requests = stub.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let req = &requests[0];
        assert_eq!(req.model, "llama3.1:8b");
        assert_eq!(req.temperature, Some(0.1));
        assert_eq!(req.max_tokens, Some(256));
        assert_eq!(req.response_format, Some(ResponseFormat::JsonObject));
        assert_eq!(req.stream, Some(false));
        assert_eq!(req.messages[0], Message::system("Be strict."));
        assert_eq!(req.messages[1], Message::user(evaluation.prompt.as_str()));
    }

    #[tokio::test]
    async fn test_evaluate_is_stateless() {
        let stub = StubProvider::replying("{}");
        let evaluator = Evaluator::builder(stub.clone()).finish().unwrap();

        evaluator.evaluate("jd one", "resume one").await.unwrap();
        evaluator.evaluate("jd two", "resume two").await.unwrap();

        let requests = stub.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].messages.len(), 2);
        assert!(!requests[1].messages[1].content.contains("jd one"));
    }

    #[tokio::test]
    async fn test_no_choices_is_a_provider_error() {
        let evaluator = Evaluator::builder(StubProvider::silent()).finish().unwrap();
        let err = evaluator.evaluate("jd", "resume").await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_transport_errors_propagate() {
        let evaluator = Evaluator::builder(FailingProvider).finish().unwrap();
        let err = evaluator.evaluate("jd", "resume").await.unwrap_err();
        assert!(matches!(err, EvalError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let jd = "Senior backend engineer, Go, distributed systems";
        let resume = "5 years Go, built a distributed cache";
        let evaluator = Evaluator::builder(StubProvider::replying(WELL_FORMED))
            .finish()
            .unwrap();

        let evaluation = evaluator.evaluate(jd, resume).await.unwrap();
        assert!(evaluation.prompt.contains(jd));
        assert!(evaluation.prompt.contains(resume));
        assert!(evaluation.prompt.contains("JSON"));
        for name in evaluator.prompt_builder().rubric().names() {
            assert!(evaluation.prompt.contains(name));
        }

        let value = parse_response(&evaluation.raw_response).unwrap();
        assert_eq!(value["overall"]["score"].as_i64(), Some(81));

        let result = EvaluationResult::from_value(value).unwrap();
        assert_eq!(result.dimensions.len(), 5);
    }
}
