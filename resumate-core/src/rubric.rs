//! Scoring rubric embedded into every prompt.
//!
//! A rubric is an ordered list of dimensions. On the wire it is a JSON
//! object keyed by dimension name:
//!
//! ```json
//! {
//!   "dimensions": {
//!     "Alignment": {
//!       "definition": "...",
//!       "guidance": ["5: ...", "3: ...", "1: ..."]
//!     }
//!   }
//! }
//! ```
//!
//! Dimension order is kept in both directions, so the prompt lists them in
//! the order they were declared.

use crate::error::EvalError;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Default system instructions sent alongside the prompt
pub const SYSTEM_INSTRUCTIONS: &str =
    "You are a meticulous recruiter. Adhere to the rubric. Return STRICT JSON only.";

/// A single scoring dimension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    pub name: String,
    pub definition: String,
    /// Score anchors, highest first
    pub guidance: Vec<String>,
}

impl Dimension {
    pub fn new<I, S>(name: impl Into<String>, definition: impl Into<String>, guidance: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            definition: definition.into(),
            guidance: guidance.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered set of scoring dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rubric {
    dimensions: Vec<Dimension>,
}

impl Rubric {
    /// Build a rubric; a later dimension with a duplicate name is rejected
    pub fn new(dimensions: Vec<Dimension>) -> Result<Self, EvalError> {
        for (i, dim) in dimensions.iter().enumerate() {
            if dimensions[..i].iter().any(|d| d.name == dim.name) {
                return Err(EvalError::configuration(format!(
                    "duplicate rubric dimension: {}",
                    dim.name
                )));
            }
        }
        Ok(Self { dimensions })
    }

    /// Load a rubric from its JSON form
    pub fn from_json(json: &str) -> Result<Self, EvalError> {
        serde_json::from_str(json)
            .map_err(|e| EvalError::configuration(format!("invalid rubric: {}", e)))
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Dimension names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.dimensions.iter().map(|d| d.name.as_str())
    }

    /// Pretty-printed JSON form, as embedded into the prompt
    pub fn to_json_pretty(&self) -> Result<String, EvalError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| EvalError::configuration(format!("failed to serialize rubric: {}", e)))
    }
}

impl Default for Rubric {
    /// The five-dimension recruiting rubric.
    ///
    /// Dimension scores are integers 0-5; the overall score is 0-100.
    fn default() -> Self {
        Self {
            dimensions: vec![
                Dimension::new(
                    "Alignment",
                    "How well the candidate fits the role responsibilities and domain.",
                    [
                        "5: Direct experience with most responsibilities and domain",
                        "3: Partial alignment; adjacent domain or less scope",
                        "1: Poor alignment",
                    ],
                ),
                Dimension::new(
                    "Skills Match",
                    "Match to required/desired technical skills and tools.",
                    [
                        "5: Most key skills present with evidence",
                        "3: Some key skills present; gaps remain",
                        "1: Few/no key skills",
                    ],
                ),
                Dimension::new(
                    "Experience Level",
                    "Years/level vs. role seniority (intern/junior/mid).",
                    ["5: Level exactly matches", "3: Slightly under/over", "1: Mismatch"],
                ),
                Dimension::new(
                    "Keywords",
                    "Presence of critical keywords from the JD.",
                    [
                        "5: Contains most critical keywords",
                        "3: Some appear",
                        "1: Few appear",
                    ],
                ),
                Dimension::new(
                    "Clarity",
                    "Resume clarity, structure, and quantification of impact.",
                    ["5: Clear, well-structured, quantified", "3: Mixed", "1: Unclear"],
                ),
            ],
        }
    }
}

#[derive(Serialize, Deserialize)]
struct DimensionBody<S> {
    definition: S,
    guidance: Vec<S>,
}

struct Dimensions<'a>(&'a [Dimension]);

impl Serialize for Dimensions<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|d| {
            (
                d.name.as_str(),
                DimensionBody {
                    definition: d.definition.as_str(),
                    guidance: d.guidance.iter().map(String::as_str).collect(),
                },
            )
        }))
    }
}

impl Serialize for Rubric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Rubric", 1)?;
        state.serialize_field("dimensions", &Dimensions(&self.dimensions))?;
        state.end()
    }
}

struct OrderedDimensions(Vec<Dimension>);

impl<'de> Deserialize<'de> for OrderedDimensions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DimensionsVisitor;

        impl<'de> Visitor<'de> for DimensionsVisitor {
            type Value = OrderedDimensions;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of dimension name to definition and guidance")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut dimensions = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, body)) = map.next_entry::<String, DimensionBody<String>>()? {
                    dimensions.push(Dimension {
                        name,
                        definition: body.definition,
                        guidance: body.guidance,
                    });
                }
                Ok(OrderedDimensions(dimensions))
            }
        }

        deserializer.deserialize_map(DimensionsVisitor)
    }
}

impl<'de> Deserialize<'de> for Rubric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            dimensions: OrderedDimensions,
        }

        let raw = Raw::deserialize(deserializer)?;
        Rubric::new(raw.dimensions.0).map_err(de::Error::custom)
    }
}
