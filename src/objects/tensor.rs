//! Tensor payloads submitted for inference or deduplication indexing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Typed tensor instances of one document.
///
/// The document id is absent for content-based lookups that address no
/// stored document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TensorInstances {
    #[serde(rename = "docId", default, skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,
    #[serde(default)]
    pub instances: Vec<HashMap<String, Tensor>>,
}

impl TensorInstances {
    pub fn new(doc_id: Option<String>, instances: Vec<HashMap<String, Tensor>>) -> Self {
        TensorInstances { doc_id, instances }
    }
}

/// One typed input value: image, text or category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tensor {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

impl Tensor {
    pub fn image(b64: impl Into<String>) -> Self {
        Tensor {
            kind: "image".to_string(),
            b64: Some(b64.into()),
            ..Tensor::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Tensor {
            kind: "text".to_string(),
            text: Some(text.into()),
            ..Tensor::default()
        }
    }

    pub fn category(categories: Vec<String>) -> Self {
        Tensor {
            kind: "category".to_string(),
            categories: Some(categories),
            ..Tensor::default()
        }
    }
}
