//! Per-family callers over the endpoint catalog.
//!
//! Each caller borrows the client, validates its parameters eagerly,
//! resolves the endpoint to a path, serializes the payload where the variant
//! requires one and interprets the response into the family's result type.

pub mod dedup;
pub mod endpoint;
pub mod export;
pub mod model;

pub use dedup::{DedupCaller, SCROLL_ID_HEADER};
pub use endpoint::{Dedup, Export, HttpMethod, Model};
pub use export::ExportCaller;
pub use model::ModelCaller;

use crate::client::session::InsightClient;

impl InsightClient {
    /// Caller for the dataset export lifecycle.
    pub fn export(&self) -> ExportCaller<'_> {
        ExportCaller::new(self)
    }

    /// Caller for model listing and inference.
    pub fn model(&self) -> ModelCaller<'_> {
        ModelCaller::new(self)
    }

    /// Caller for near-duplicate detection.
    pub fn dedup(&self) -> DedupCaller<'_> {
        DedupCaller::new(self)
    }
}
