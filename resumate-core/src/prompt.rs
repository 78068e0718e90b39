//! Prompt construction.
//!
//! The user prompt is a fixed template: the job description and resume are
//! interpolated verbatim, followed by the serialized rubric, a fixed example
//! of the expected output and a strict-JSON instruction.

use crate::error::EvalError;
use crate::rubric::{Rubric, SYSTEM_INSTRUCTIONS};
use crate::types::Message;

/// Closing instruction of every prompt
pub const JSON_ONLY_NOTE: &str =
    "Return ONLY a valid JSON object. Do not include markdown fences, backticks, or prose.";

/// Example of the JSON document the model must return
pub const OUTPUT_SCHEMA: &str = r#"{
  "dimensions": [
    {"name": "Alignment", "score": 0, "evidence": ""},
    {"name": "Skills Match", "score": 0, "evidence": ""},
    {"name": "Experience Level", "score": 0, "evidence": ""},
    {"name": "Keywords", "score": 0, "evidence": ""},
    {"name": "Clarity", "score": 0, "evidence": ""}
  ],
  "overall": {
    "score": 0,
    "recommended_action": "reject | consider | strong_consider",
    "summary": ""
  },
  "suggested_improvements": ["short actionable bullets…"]
}"#;

/// Builds the system and user messages for one evaluation
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    rubric: Rubric,
    rubric_json: String,
    system_instructions: String,
}

impl PromptBuilder {
    /// Create a builder around a rubric.
    ///
    /// The rubric is serialized once here; building prompts afterwards
    /// cannot fail.
    pub fn new(rubric: Rubric) -> Result<Self, EvalError> {
        let rubric_json = rubric.to_json_pretty()?;
        Ok(Self {
            rubric,
            rubric_json,
            system_instructions: SYSTEM_INSTRUCTIONS.to_string(),
        })
    }

    /// Replace the system instructions
    pub fn with_system_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.system_instructions = instructions.into();
        self
    }

    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    pub fn system_instructions(&self) -> &str {
        &self.system_instructions
    }

    /// Render the user prompt
    pub fn build(&self, job_description: &str, resume_text: &str) -> String {
        let prompt = format!(
            "You are an expert technical recruiter and hiring manager. Follow the rubric strictly.\n\
             \n\
             # Job Description\n\
             {job_description}\n\
             \n\
             # Candidate Resume\n\
             {resume_text}\n\
             \n\
             # Rubric (immutable)\n\
             {rubric}\n\
             \n\
             # Output JSON Schema (immutable)\n\
             {schema}\n\
             \n\
             {note}",
            rubric = self.rubric_json,
            schema = OUTPUT_SCHEMA,
            note = JSON_ONLY_NOTE,
        );
        prompt.trim().to_string()
    }

    /// System and user messages, in that order
    pub fn messages(&self, job_description: &str, resume_text: &str) -> Vec<Message> {
        vec![
            Message::system(self.system_instructions.as_str()),
            Message::user(self.build(job_description, resume_text)),
        ]
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        let rubric = Rubric::default();
        // The default rubric holds plain strings only.
        let rubric_json = rubric.to_json_pretty().unwrap_or_default();
        Self {
            rubric,
            rubric_json,
            system_instructions: SYSTEM_INSTRUCTIONS.to_string(),
        }
    }
}
