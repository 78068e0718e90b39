//! Evaluation outcome types.

use crate::error::EvalError;
use serde::{Deserialize, Serialize};

/// Outcome of one evaluation request.
///
/// Holds the untouched model output and the user prompt that produced it.
/// Parsing is left to the caller, see [`crate::normalize::parse_response`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub raw_response: String,
    pub prompt: String,
}

impl From<Evaluation> for (String, String) {
    fn from(evaluation: Evaluation) -> Self {
        (evaluation.raw_response, evaluation.prompt)
    }
}

/// Hiring recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    Reject,
    Consider,
    StrongConsider,
}

/// Score for one rubric dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct DimensionScore {
    pub name: String,
    /// 0 to 5
    pub score: u8,
    #[serde(default)]
    pub evidence: String,
}

/// Overall verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct OverallAssessment {
    /// 0 to 100
    pub score: u8,
    pub recommended_action: RecommendedAction,
    #[serde(default)]
    pub summary: String,
}

/// Expected shape of the model output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct EvaluationResult {
    pub dimensions: Vec<DimensionScore>,
    pub overall: OverallAssessment,
    #[serde(default)]
    pub suggested_improvements: Vec<String>,
}

impl EvaluationResult {
    /// Convert normalized JSON into the typed result
    pub fn from_value(value: serde_json::Value) -> Result<Self, EvalError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Score of a named dimension
    pub fn dimension(&self, name: &str) -> Option<&DimensionScore> {
        self.dimensions.iter().find(|d| d.name == name)
    }
}
