//! Case repository module.

mod r#trait;
pub use r#trait::CaseRepository;

#[cfg(any(test, feature = "test-support"))]
mod mock;
#[cfg(any(test, feature = "test-support"))]
pub use mock::MockCaseRepository;
