//! Prediction results returned by the inference endpoint.

use std::collections::HashMap;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use tracing::warn;

const JSON_OUTPUTS: &str = "output_names";
const JSON_LABELS: &str = "_labels";

/// Label probabilities per model output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InsightResponse {
    pub labels: HashMap<String, Vec<Label>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub confidence: f32,
}

impl Label {
    pub fn new(name: impl Into<String>, confidence: f32) -> Self {
        Label {
            name: name.into(),
            confidence,
        }
    }
}

impl InsightResponse {
    /// Parse a prediction response body.
    pub fn parse(body: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

// Two wire shapes exist: the internal `{"labels": {…}}` form, and the
// external `{"results": [{"output_names": [n, …], "<n>": [probabilities],
// "<n>_labels": [names]}]}` form produced by the inference service.
impl<'de> Deserialize<'de> for InsightResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let node = serde_json::Value::deserialize(deserializer)?;

        if let Some(labels) = node.get("labels") {
            let labels = serde_json::from_value(labels.clone()).map_err(de::Error::custom)?;
            return Ok(InsightResponse { labels });
        }

        let mut labels: HashMap<String, Vec<Label>> = HashMap::new();
        let results = node
            .get("results")
            .and_then(|results| results.as_array())
            .into_iter()
            .flatten();
        for elem in results {
            let output_names = elem
                .get(JSON_OUTPUTS)
                .and_then(|names| names.as_array())
                .into_iter()
                .flatten();
            for name in output_names {
                let Some(name) = name.as_str() else { continue };
                let collected = labels.entry(name.to_string()).or_default();

                let probabilities = elem.get(name).and_then(|value| value.as_array());
                let label_names = elem
                    .get(format!("{name}{JSON_LABELS}"))
                    .and_then(|value| value.as_array());
                let (Some(probabilities), Some(label_names)) = (probabilities, label_names)
                else {
                    warn!("either {} or its labels are null", name);
                    continue;
                };

                if probabilities.len() != label_names.len() {
                    warn!("mismatch of labels and probabilities cardinality");
                    continue;
                }

                for (label, probability) in label_names.iter().zip(probabilities) {
                    collected.push(Label::new(
                        label.as_str().unwrap_or_default(),
                        probability.as_f64().unwrap_or(0.0) as f32,
                    ));
                }
            }
        }
        Ok(InsightResponse { labels })
    }
}
