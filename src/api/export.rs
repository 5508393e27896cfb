//! Caller for the dataset export lifecycle: Init → Attach → Bind → Done.

use tracing::{error, info};

use crate::api::endpoint::Export;
use crate::client::session::InsightClient;
use crate::error::{InsightError, Result};
use crate::objects::{AICorpus, CorporaParameters};

pub struct ExportCaller<'a> {
    client: &'a InsightClient,
}

impl<'a> ExportCaller<'a> {
    pub(crate) fn new(client: &'a InsightClient) -> Self {
        ExportCaller { client }
    }

    fn require_connected(&self) -> Result<()> {
        if !self.client.is_connected() {
            return Err(InsightError::Configuration("no active client".to_string()));
        }
        Ok(())
    }

    /// Initialize a corpus export from corpora parameters.
    ///
    /// Returns the `uid` of the created corpora document. A successful HTTP
    /// status without a usable `uid` in the body is a domain failure: it is
    /// logged and `None` returned.
    pub fn init(&self, corpora_id: &str, parameters: &CorporaParameters) -> Result<Option<String>> {
        self.require_connected()?;
        let payload = serde_json::to_string(parameters)?;
        let path = Export::Init.to_path(self.client.project_id(), corpora_id)?;

        Ok(self.client.call_cloud(
            || self.client.post(&path, None, &payload),
            |response| {
                if !response.is_successful() {
                    error!(
                        "failed to initialize export for project {}, payload {}, url {}, code {} and reason {}",
                        self.client.project_id(),
                        payload,
                        self.client.url(),
                        response.code(),
                        response.message()
                    );
                    return Ok(None);
                }

                let node: serde_json::Value = response.json()?;
                match node.get("uid").and_then(|uid| uid.as_str()) {
                    Some(uid) => {
                        info!(
                            "corpora {} created for project {}",
                            uid,
                            self.client.project_id()
                        );
                        Ok(Some(uid.to_string()))
                    }
                    None => {
                        error!(
                            "corpora for project {} and id {} wasn't created; payload {}",
                            self.client.project_id(),
                            corpora_id,
                            payload
                        );
                        Ok(None)
                    }
                }
            },
        ))
    }

    /// Attach a corpus dataset document to an initialized corpora.
    pub fn attach(&self, corpora_id: &str, corpus: &AICorpus) -> Result<Option<String>> {
        self.require_connected()?;
        let payload = serde_json::to_string(corpus)?;
        let path = Export::Attach.to_path(self.client.project_id(), corpora_id)?;

        info!("creating dataset document for corpora {}", corpora_id);
        Ok(self.client.call_cloud(
            || self.client.post(&path, None, &payload),
            |response| {
                if !response.is_successful() {
                    error!(
                        "failed to create the corpus dataset for project {}, payload {}, url {}, code {} and reason {}",
                        self.client.project_id(),
                        payload,
                        self.client.url(),
                        response.code(),
                        response.message()
                    );
                    return Ok(None);
                }

                let node: serde_json::Value = response.json()?;
                match node.get("uid").and_then(|uid| uid.as_str()) {
                    Some(uid) => {
                        info!(
                            "corpus {} added to project {}",
                            uid,
                            self.client.project_id()
                        );
                        Ok(Some(uid.to_string()))
                    }
                    None => {
                        error!(
                            "failed to create the corpus dataset for project {}; no uid in response",
                            self.client.project_id()
                        );
                        Ok(None)
                    }
                }
            },
        ))
    }

    /// Bind a corpora to a model.
    pub fn bind(&self, model_id: &str, corpora_id: &str) -> Result<bool> {
        self.require_connected()?;
        let path = Export::Bind.bind_path(self.client.project_id(), model_id, corpora_id)?;

        let bound = self.client.call_cloud(
            || self.client.post(&path, None, "{}"),
            |response| {
                if !response.is_successful() {
                    error!(
                        "failed to bind model {} with corpora {} for project {}, url {}, code {} and reason {}",
                        model_id,
                        corpora_id,
                        self.client.project_id(),
                        self.client.url(),
                        response.code(),
                        response.message()
                    );
                    return Ok(Some(false));
                }
                Ok(Some(true))
            },
        );
        Ok(bound.unwrap_or(false))
    }

    /// Mark an export as done. Only HTTP 200 counts as success.
    pub fn done(&self, export_id: &str) -> Result<bool> {
        self.require_connected()?;
        let path = Export::Done.to_path(self.client.project_id(), export_id)?;

        let code = self.client.call_cloud(
            || self.client.post(&path, None, "{}"),
            |response| {
                if response.code() != 200 {
                    error!(
                        "failed to mark export {} as done for project {}, url {}, code {} and reason {}",
                        export_id,
                        self.client.project_id(),
                        self.client.url(),
                        response.code(),
                        response.message()
                    );
                }
                Ok(Some(response.code()))
            },
        );
        Ok(code == Some(200))
    }
}
