//! Wire DTOs of the Insight API.
//!
//! Only the shapes that affect protocol semantics are fully specified:
//! corpora identifiers, tensor payloads, scroll cursors and
//! similar-document tuples. Everything else follows the service's JSON as
//! loosely-typed fields.

pub mod corpora;
pub mod dedup;
pub mod prediction;
pub mod tensor;

pub use corpora::{AICorpus, CorporaParameters, CorpusProperties, PropertyType};
pub use dedup::{ScrollableResult, SimilarTuple};
pub use prediction::{InsightResponse, Label};
pub use tensor::{Tensor, TensorInstances};
