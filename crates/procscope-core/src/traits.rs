//! Core engine traits.

use crate::engine::EngineMetadata;

/// Base trait for all analysis engines.
///
/// Engines are stateless: their computations are associated functions over
/// caller-supplied data, and the engine value itself only carries metadata.
pub trait Engine: Send + Sync {
    /// Returns the engine metadata.
    fn metadata(&self) -> &EngineMetadata;

    /// Returns the engine id.
    fn id(&self) -> &str {
        &self.metadata().id
    }
}
