//! Corpus construction payloads for the export family.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Parameters of a corpora document: the properties participating in
/// training and an optional selection query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorporaParameters {
    #[serde(default)]
    pub fields: Vec<PropertyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

/// A document property named for training, with its declared data type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyType {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl PropertyType {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        PropertyType {
            name: name.into(),
            kind: Some(kind.into()),
        }
    }
}

/// Dataset document attached to an initialized corpora.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AICorpus {
    #[serde(rename = "entity-type", default = "document_entity")]
    pub entity_type: String,
    pub name: String,
    pub properties: CorpusProperties,
}

fn document_entity() -> String {
    "document".to_string()
}

impl AICorpus {
    pub fn new(name: impl Into<String>, properties: CorpusProperties) -> Self {
        AICorpus {
            entity_type: document_entity(),
            name: name.into(),
            properties,
        }
    }
}

/// Properties of a corpus dataset document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CorpusProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
    pub doc_count: u64,
    pub split: u32,
    pub evaluation_doc_count: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<HashMap<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<ExportInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub train_data: Option<BatchRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_data: Option<BatchRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<BatchRef>,
}

impl CorpusProperties {
    pub fn builder() -> CorpusPropertiesBuilder {
        CorpusPropertiesBuilder::default()
    }
}

/// Start/end timestamps of the export run, preformatted by the producer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportInfo {
    pub start: String,
    pub end: String,
}

/// Reference to an uploaded batch (train data, eval data or statistics).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchRef {
    pub index: String,
    pub name: String,
}

impl BatchRef {
    pub fn new(index: impl Into<String>, name: impl Into<String>) -> Self {
        BatchRef {
            index: index.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CorpusPropertiesBuilder {
    properties: CorpusProperties,
}

impl CorpusPropertiesBuilder {
    pub fn batch_id(mut self, batch_id: impl Into<String>) -> Self {
        self.properties.batch_id = Some(batch_id.into());
        self
    }

    pub fn doc_count(mut self, doc_count: u64) -> Self {
        self.properties.doc_count = doc_count;
        self
    }

    pub fn split(mut self, split: u32) -> Self {
        self.properties.split = split;
        self
    }

    pub fn evaluation_doc_count(mut self, evaluation_doc_count: u64) -> Self {
        self.properties.evaluation_doc_count = evaluation_doc_count;
        self
    }

    pub fn fields(mut self, fields: Vec<HashMap<String, serde_json::Value>>) -> Self {
        self.properties.fields = fields;
        self
    }

    pub fn info(mut self, info: ExportInfo) -> Self {
        self.properties.info = Some(info);
        self
    }

    pub fn train_data(mut self, batch: BatchRef) -> Self {
        self.properties.train_data = Some(batch);
        self
    }

    pub fn eval_data(mut self, batch: BatchRef) -> Self {
        self.properties.eval_data = Some(batch);
        self
    }

    pub fn stats(mut self, batch: BatchRef) -> Self {
        self.properties.stats = Some(batch);
        self
    }

    pub fn build(self) -> CorpusProperties {
        self.properties
    }
}
