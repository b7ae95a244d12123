//! Evidence document repository module.

mod r#trait;
pub use r#trait::EvidenceRepository;

#[cfg(any(test, feature = "test-support"))]
mod mock;
#[cfg(any(test, feature = "test-support"))]
pub use mock::MockEvidenceRepository;
