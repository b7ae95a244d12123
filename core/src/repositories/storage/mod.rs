//! Artifact storage interface.

mod r#trait;
pub use r#trait::ArtifactStore;

#[cfg(any(test, feature = "test-support"))]
mod mock;
#[cfg(any(test, feature = "test-support"))]
pub use mock::MockArtifactStore;
