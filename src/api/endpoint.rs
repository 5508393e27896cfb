//! Endpoint catalog of the Insight public API.
//!
//! Three closed families: dataset export, model operations and near-duplicate
//! detection. Each variant carries its HTTP verb and resolves itself to a
//! relative path from the project id and the identifiers the variant needs.
//! Resolution is pure and never performs I/O: a missing required parameter
//! fails with `InvalidParameters`, asking a variant for a path shape it does
//! not support fails with `UnsupportedPath`.
//!
//! Paths are built by literal concatenation of the family prefix, an action
//! segment and the identifiers; identifiers are opaque to the client.

use std::fmt;

use crate::error::{InsightError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Prefix of the export family.
pub const API_EXPORT_AI: &str = "ai_export/";

/// Prefix of the model family.
pub const API_AI: &str = "ai/";

/// Prefix of the deduplication family.
pub const API_DEDUP: &str = "ai/dedup/";

fn require(value: &str, name: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(InsightError::InvalidParameters(format!(
            "{name} is a required parameter"
        )));
    }
    Ok(())
}

fn require_some<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(InsightError::InvalidParameters(format!(
            "{name} is a required parameter"
        ))),
    }
}

/// Lifecycle stages for building a training corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Export {
    Init,
    Attach,
    Bind,
    Done,
}

impl Export {
    pub fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn name(&self) -> &'static str {
        match self {
            Export::Init => "Export.Init",
            Export::Attach => "Export.Attach",
            Export::Bind => "Export.Bind",
            Export::Done => "Export.Done",
        }
    }

    /// Resolve the single-id path shape (Init, Attach, Done).
    pub fn to_path(&self, project: &str, id: &str) -> Result<String> {
        require(project, "project")?;
        match self {
            Export::Init => {
                require(id, "corpora id")?;
                Ok(format!("{API_EXPORT_AI}init/{project}?corpora={id}"))
            }
            Export::Attach => {
                require(id, "corpora id")?;
                Ok(format!("{API_EXPORT_AI}attach/{project}/{id}"))
            }
            Export::Done => {
                require(id, "export id")?;
                Ok(format!("{API_EXPORT_AI}done/{project}/{id}"))
            }
            Export::Bind => Err(InsightError::UnsupportedPath(self.name())),
        }
    }

    /// Resolve the two-key bind shape (Bind only).
    pub fn bind_path(&self, project: &str, model_id: &str, corpora_id: &str) -> Result<String> {
        match self {
            Export::Bind => {
                require(project, "project")?;
                require(model_id, "model id")?;
                require(corpora_id, "corpora id")?;
                Ok(format!(
                    "{API_EXPORT_AI}bind/{project}?modelId={model_id}&corporaId={corpora_id}"
                ))
            }
            _ => Err(InsightError::UnsupportedPath(self.name())),
        }
    }
}

/// Read and query operations against trained models, plus prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Model {
    All,
    ByDatasource,
    Published,
    Delta,
    Predict,
}

impl Model {
    pub fn method(&self) -> HttpMethod {
        match self {
            Model::Predict => HttpMethod::Post,
            _ => HttpMethod::Get,
        }
    }

    /// Resolve from the optional id (model id or name) and datasource/label
    /// slots; each variant requires its own subset.
    pub fn to_path(&self, project: &str, id: Option<&str>, datasource: Option<&str>) -> Result<String> {
        require(project, "project")?;
        match self {
            Model::All => Ok(format!("{API_AI}{project}/models?properties=ai_model")),
            Model::ByDatasource => {
                let datasource = require_some(datasource, "datasource")?;
                Ok(format!(
                    "{API_AI}{project}/models?properties=ai_model&datasource={datasource}"
                ))
            }
            Model::Published => {
                let label = require_some(datasource, "label")?;
                Ok(format!(
                    "{API_AI}{project}/models?properties=ai_model&publishState=published&label={label}"
                ))
            }
            Model::Delta => {
                let id = require_some(id, "model id")?;
                Ok(format!("{API_AI}{project}/model/{id}/corpusdelta"))
            }
            Model::Predict => {
                let name = require_some(id, "model name")?;
                let datasource = require_some(datasource, "datasource")?;
                Ok(format!(
                    "{API_AI}{project}/model/{name}/{datasource}/predict?datasource={datasource}"
                ))
            }
        }
    }
}

/// Near-duplicate indexing and lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dedup {
    Index,
    Find,
    All,
    Delete,
    Drop,
    RecalculateTuples,
}

impl Dedup {
    /// Verb of the fixed-verb variants. `Find` defaults to GET; the
    /// content-based lookup dispatches it as POST through
    /// [`Dedup::find_path`].
    pub fn method(&self) -> HttpMethod {
        match self {
            Dedup::Index | Dedup::RecalculateTuples => HttpMethod::Post,
            Dedup::Find | Dedup::All => HttpMethod::Get,
            Dedup::Delete | Dedup::Drop => HttpMethod::Delete,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Dedup::Index => "Dedup.Index",
            Dedup::Find => "Dedup.Find",
            Dedup::All => "Dedup.All",
            Dedup::Delete => "Dedup.Delete",
            Dedup::Drop => "Dedup.Drop",
            Dedup::RecalculateTuples => "Dedup.RecalculateTuples",
        }
    }

    /// Resolve the indexing path (Index only).
    pub fn index_path(&self, project: &str, doc_id: &str, xpath: &str) -> Result<String> {
        match self {
            Dedup::Index => {
                require(project, "project")?;
                require(doc_id, "document id")?;
                require(xpath, "xpath")?;
                Ok(format!("{API_DEDUP}{project}/index/{doc_id}/{xpath}"))
            }
            _ => Err(InsightError::UnsupportedPath(self.name())),
        }
    }

    /// Resolve the dual-shape lookup path (Find only).
    ///
    /// Dispatched as GET the lookup addresses a stored document and requires
    /// both the document id and the xpath in the path; dispatched as POST the
    /// lookup is content-based, the document id is absent and the xpath
    /// travels as a query parameter when present.
    pub fn find_path(
        &self,
        method: HttpMethod,
        project: &str,
        doc_id: Option<&str>,
        xpath: Option<&str>,
        distance: u32,
    ) -> Result<String> {
        if *self != Dedup::Find {
            return Err(InsightError::UnsupportedPath(self.name()));
        }
        require(project, "project")?;
        match method {
            HttpMethod::Get => {
                let doc_id = require_some(doc_id, "document id")?;
                let xpath = require_some(xpath, "xpath")?;
                Ok(format!(
                    "{API_DEDUP}{project}/find/{doc_id}/{xpath}?distance={distance}"
                ))
            }
            HttpMethod::Post => {
                let segment = xpath
                    .filter(|x| !x.trim().is_empty())
                    .map(|x| format!("&xpath={x}"))
                    .unwrap_or_default();
                Ok(format!(
                    "{API_DEDUP}{project}/find?distance={distance}{segment}"
                ))
            }
            _ => Err(InsightError::UnsupportedPath(self.name())),
        }
    }

    /// Resolve the listing path (All only); the scroll cursor travels as a
    /// header, not in the path.
    pub fn scroll_path(&self, project: &str) -> Result<String> {
        match self {
            Dedup::All => {
                require(project, "project")?;
                Ok(format!("{API_DEDUP}{project}/all"))
            }
            _ => Err(InsightError::UnsupportedPath(self.name())),
        }
    }

    /// Resolve the single-document removal path (Delete only).
    pub fn delete_path(&self, project: &str, doc_id: &str, xpath: Option<&str>) -> Result<String> {
        match self {
            Dedup::Delete => {
                require(project, "project")?;
                require(doc_id, "document id")?;
                match xpath.filter(|x| !x.trim().is_empty()) {
                    Some(xpath) => Ok(format!("{API_DEDUP}{project}/index/{doc_id}/{xpath}")),
                    None => Ok(format!("{API_DEDUP}{project}/index/{doc_id}")),
                }
            }
            _ => Err(InsightError::UnsupportedPath(self.name())),
        }
    }

    /// Resolve the whole-index removal path (Drop only).
    pub fn drop_path(&self, project: &str) -> Result<String> {
        match self {
            Dedup::Drop => {
                require(project, "project")?;
                Ok(format!("{API_DEDUP}{project}/index"))
            }
            _ => Err(InsightError::UnsupportedPath(self.name())),
        }
    }

    /// Resolve the tuple-recalculation path (RecalculateTuples only).
    pub fn recalculate_path(&self, project: &str, threshold: u32) -> Result<String> {
        match self {
            Dedup::RecalculateTuples => {
                require(project, "project")?;
                Ok(format!("{API_DEDUP}{project}/recalculate?threshold={threshold}"))
            }
            _ => Err(InsightError::UnsupportedPath(self.name())),
        }
    }
}
