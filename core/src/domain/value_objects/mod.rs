//! Value objects representing immutable domain concepts.

pub mod artifact;
pub mod login;
pub mod storage_key;

// Re-export commonly used types
pub use artifact::{DurableArtifact, PendingArtifact};
pub use login::LoginOutcome;
pub use storage_key::StorageKey;
