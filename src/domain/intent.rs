use serde::{Deserialize, Serialize};

/// Structured output of the intent-extraction step.
///
/// Only `response` is contractually guaranteed; the model is free to attach
/// further keys (action names, slot values) which are carried through
/// untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentParameters {
    pub response: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl IntentParameters {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            extra: serde_json::Map::new(),
        }
    }
}
