//! Client for the Insight document-intelligence cloud service.
//!
//! Exposes the three public endpoint families over HTTP with JSON payloads:
//! - dataset export (`ai_export/`): the corpus lifecycle Init → Attach → Bind → Done
//! - model listing and inference (`ai/`)
//! - near-duplicate detection and indexing (`ai/dedup/`), including the
//!   cursor-based listing of similar-document tuples
//!
//! [`InsightClient`] owns the configuration and a lazily created transport;
//! the per-family callers obtained through [`InsightClient::export`],
//! [`InsightClient::model`] and [`InsightClient::dedup`] resolve endpoints,
//! serialize payloads and interpret responses.
//!
//! ```no_run
//! use insight_client::{Authentication, InsightClient, InsightConfiguration};
//!
//! # fn main() -> insight_client::Result<()> {
//! let config = InsightConfiguration::builder()
//!     .url("https://insight.example.com")
//!     .project_id("my-project")
//!     .authentication(Authentication::token("s3cr3t"))
//!     .build()?;
//! let client = InsightClient::new(config);
//! client.connect()?;
//!
//! let models = client.model().all()?;
//! # let _ = models;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod objects;

pub use api::{Dedup, DedupCaller, Export, ExportCaller, HttpMethod, Model, ModelCaller};
pub use client::{Authentication, InsightClient, InsightConfiguration, RawResponse};
pub use error::{InsightError, Result};
