//! Similar-document listing results.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Deserializer};

/// One page of the scrolled similar-document listing.
///
/// The cursor is opaque: pass it back verbatim to fetch the next page. An
/// empty page may still carry a cursor; emptiness is server-defined and not
/// necessarily terminal.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScrollableResult {
    #[serde(rename = "scrollId", default)]
    pub scroll_id: Option<String>,
    #[serde(default)]
    pub result: Vec<SimilarTuple>,
}

impl ScrollableResult {
    pub fn empty() -> Self {
        ScrollableResult::default()
    }

    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }
}

/// A document property and the set of documents similar to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarTuple {
    pub document_id: String,
    pub xpath: Option<String>,
    /// `(repository, document id)` references.
    pub similar_documents: BTreeSet<(String, String)>,
}

impl SimilarTuple {
    /// Document ids of the similar documents, without their repositories.
    pub fn similar_document_ids(&self) -> Vec<&str> {
        self.similar_documents
            .iter()
            .map(|(_, id)| id.as_str())
            .collect()
    }
}

// On the wire each similar document arrives as a single-entry object
// `{"<repository>": "<document id>"}`; empty entries are dropped.
impl<'de> Deserialize<'de> for SimilarTuple {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wire {
            #[serde(rename = "documentId", default)]
            document_id: String,
            #[serde(default)]
            xpath: Option<String>,
            #[serde(rename = "similarDocuments", default)]
            similar_documents: Vec<HashMap<String, String>>,
        }

        let wire = Wire::deserialize(deserializer)?;
        let similar_documents = wire
            .similar_documents
            .into_iter()
            .filter_map(|entry| entry.into_iter().next())
            .collect();
        Ok(SimilarTuple {
            document_id: wire.document_id,
            xpath: wire.xpath,
            similar_documents,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_deserializes_cursor_and_tuples() {
        let json = r#"{
            "scrollId": "scroll-1",
            "result": [
                {
                    "documentId": "doc1",
                    "xpath": "file:content",
                    "similarDocuments": [{"default": "doc12"}, {"default": "doc13"}]
                }
            ]
        }"#;

        let page: ScrollableResult = serde_json::from_str(json).expect("deserialize");
        assert_eq!(page.scroll_id.as_deref(), Some("scroll-1"));
        assert_eq!(page.result.len(), 1);

        let tuple = &page.result[0];
        assert_eq!(tuple.document_id, "doc1");
        assert_eq!(tuple.xpath.as_deref(), Some("file:content"));
        assert_eq!(tuple.similar_document_ids(), vec!["doc12", "doc13"]);
    }

    #[test]
    fn empty_similar_document_entries_are_dropped() {
        let json = r#"{
            "documentId": "doc1",
            "xpath": "file:content",
            "similarDocuments": [{}, {"default": "doc12"}]
        }"#;

        let tuple: SimilarTuple = serde_json::from_str(json).expect("deserialize");
        assert_eq!(tuple.similar_document_ids(), vec!["doc12"]);
    }

    #[test]
    fn missing_cursor_and_results_yield_an_empty_page() {
        let page: ScrollableResult = serde_json::from_str("{}").expect("deserialize");
        assert!(page.scroll_id.is_none());
        assert!(page.is_empty());
        assert_eq!(page, ScrollableResult::empty());
    }
}
