//! Source adapter capability
//!
//! Each external catalog is wrapped in one adapter. The engine treats
//! adapters polymorphically: a name for logging and wiring, a list of
//! configurable options for the outer surface to expose, and a fetch
//! operation yielding raw `(title, link)` candidates. Adapters are
//! independent — each owns its own client state, and a failing adapter
//! contributes nothing without poisoning the rest of the batch.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::AdapterError;
use crate::types::RawCandidate;

/// A configurable option exposed by a source adapter.
///
/// Purely descriptive: the outer surface (CLI, web handler) decides how
/// to present the flag; the adapter consumes the value through its
/// constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceOption {
    /// Flag name, e.g. `"nyaa-category"`
    pub flag: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Shape of the expected argument, e.g. `"URL"` or `"CATEGORY"`
    pub shape: &'static str,
}

/// Capability implemented by every catalog adapter.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Short name of the catalog, used in logs and source selection.
    fn name(&self) -> &'static str;

    /// The configurable options this adapter understands.
    fn options(&self) -> Vec<SourceOption> {
        Vec::new()
    }

    /// Fetch raw candidates for a freeform search text.
    ///
    /// An empty list is a normal outcome (the catalog simply has no
    /// matches); errors are per-call and never affect other adapters.
    async fn fetch(&self, query: &str) -> Result<Vec<RawCandidate>, AdapterError>;
}
