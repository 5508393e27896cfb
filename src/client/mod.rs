pub mod config;
pub mod session;

pub use config::{Authentication, InsightConfiguration};
pub use session::{InsightClient, RawResponse};
