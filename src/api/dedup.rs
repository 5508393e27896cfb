//! Caller for near-duplicate detection: indexing, lookup and the scrolled
//! listing of similar-document tuples.
//!
//! The listing is cursor-based: the first page is fetched without a cursor,
//! every page carries the cursor for the next one in its body, and the
//! caller passes it back verbatim through the [`SCROLL_ID_HEADER`] request
//! header. The cursor is opaque and owned by the server; an empty page is
//! not necessarily terminal, the consumer decides when to stop.

use std::collections::HashMap;

use tracing::{debug, error};

use crate::api::endpoint::{Dedup, HttpMethod};
use crate::client::session::{InsightClient, RawResponse};
use crate::error::{InsightError, Result};
use crate::objects::{ScrollableResult, TensorInstances};

/// Request header carrying the opaque scroll cursor; omitted on the first
/// page.
pub const SCROLL_ID_HEADER: &str = "X-Scroll-Id";

pub struct DedupCaller<'a> {
    client: &'a InsightClient,
}

impl<'a> DedupCaller<'a> {
    pub(crate) fn new(client: &'a InsightClient) -> Self {
        DedupCaller { client }
    }

    /// Register a document's feature tensor in the deduplication index.
    pub fn index(&self, doc_id: &str, xpath: &str, payload: &TensorInstances) -> Result<bool> {
        if doc_id.trim().is_empty() || xpath.trim().is_empty() {
            return Err(InsightError::InvalidParameters(
                "document uuid, xpath and payload are required parameters".to_string(),
            ));
        }
        let json = serde_json::to_string(payload)?;
        let path = Dedup::Index.index_path(self.client.project_id(), doc_id, xpath)?;

        let indexed = self.client.call_cloud(
            || self.client.post(&path, None, &json),
            |response| {
                if response.is_successful() {
                    debug!("successfully indexed document {} with xpath {}", doc_id, xpath);
                    return Ok(Some(true));
                }
                error!(
                    "failed to index document {} with xpath {} for project {}, url {}, code {} and reason {}",
                    doc_id,
                    xpath,
                    self.client.project_id(),
                    self.client.url(),
                    response.code(),
                    response.message()
                );
                Ok(Some(false))
            },
        );
        Ok(indexed.unwrap_or(false))
    }

    /// Look up documents similar to a stored document property.
    pub fn find_by_document(&self, doc_id: &str, xpath: &str, distance: u32) -> Result<Vec<String>> {
        if doc_id.trim().is_empty() || xpath.trim().is_empty() {
            return Err(InsightError::InvalidParameters(
                "document uuid and xpath are required parameters".to_string(),
            ));
        }
        let path = Dedup::Find.find_path(
            HttpMethod::Get,
            self.client.project_id(),
            Some(doc_id),
            Some(xpath),
            distance,
        )?;

        let found = self.client.call_cloud(
            || self.client.get(&path, None),
            |response| self.similar_ids(response, Some(doc_id), xpath),
        );
        Ok(found.unwrap_or_default())
    }

    /// Look up documents similar to a submitted tensor; no stored document is
    /// addressed, the xpath narrows the search when present.
    pub fn find_by_tensor(
        &self,
        xpath: Option<&str>,
        distance: u32,
        payload: &TensorInstances,
    ) -> Result<Vec<String>> {
        let json = serde_json::to_string(payload)?;
        let path = Dedup::Find.find_path(
            HttpMethod::Post,
            self.client.project_id(),
            None,
            xpath,
            distance,
        )?;

        let found = self.client.call_cloud(
            || self.client.post(&path, None, &json),
            |response| self.similar_ids(response, None, xpath.unwrap_or_default()),
        );
        Ok(found.unwrap_or_default())
    }

    /// Fetch one page of the similar-document listing.
    ///
    /// Pass the cursor of the previous page to continue scrolling; `None`
    /// starts from the beginning. The returned page carries the cursor for
    /// the next call and replaces any previously held one.
    pub fn all(&self, scroll_id: Option<&str>) -> Result<Option<ScrollableResult>> {
        let path = Dedup::All.scroll_path(self.client.project_id())?;
        let headers = scroll_id.map(|id| {
            HashMap::from([(SCROLL_ID_HEADER.to_string(), id.to_string())])
        });

        Ok(self.client.call_cloud(
            || self.client.get(&path, headers.as_ref()),
            |response| {
                if !response.is_successful() {
                    error!(
                        "failed to get all similar documents for project {}, url {}, code {} and reason {}",
                        self.client.project_id(),
                        self.client.url(),
                        response.code(),
                        response.message()
                    );
                    return Ok(None);
                }
                Ok(Some(response.json::<ScrollableResult>()?))
            },
        ))
    }

    /// Recalculate similar-document tuples with the given distance threshold.
    pub fn recalculate_tuples(&self, threshold: u32) -> Result<bool> {
        let path = Dedup::RecalculateTuples.recalculate_path(self.client.project_id(), threshold)?;
        let accepted = self.client.call_cloud(
            || self.client.post(&path, None, "{}"),
            |response| Ok(Some(response.is_successful())),
        );
        Ok(accepted.unwrap_or(false))
    }

    /// Remove one document property from the index.
    pub fn delete(&self, doc_id: &str, xpath: Option<&str>) -> Result<bool> {
        if doc_id.trim().is_empty() {
            return Err(InsightError::InvalidParameters(
                "document uuid is a required parameter".to_string(),
            ));
        }
        let path = Dedup::Delete.delete_path(self.client.project_id(), doc_id, xpath)?;
        let deleted = self.client.call_cloud(
            || self.client.delete(&path, None, "{}"),
            |response| Ok(Some(response.is_successful())),
        );
        Ok(deleted.unwrap_or(false))
    }

    /// Drop the whole deduplication index of the project.
    pub fn drop_index(&self) -> Result<bool> {
        let path = Dedup::Drop.drop_path(self.client.project_id())?;
        let dropped = self.client.call_cloud(
            || self.client.delete(&path, None, "{}"),
            |response| Ok(Some(response.is_successful())),
        );
        Ok(dropped.unwrap_or(false))
    }

    fn similar_ids(
        &self,
        response: &RawResponse,
        doc_id: Option<&str>,
        xpath: &str,
    ) -> Result<Option<Vec<String>>> {
        if !response.is_successful() {
            error!(
                "failed to find similar documents of {:?} with xpath {} for project {}, url {}, code {} and reason {}",
                doc_id,
                xpath,
                self.client.project_id(),
                self.client.url(),
                response.code(),
                response.message()
            );
            return Ok(Some(Vec::new()));
        }
        Ok(Some(response.json::<Vec<String>>()?))
    }
}
