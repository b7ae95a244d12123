//! User repository module.

mod r#trait;
pub use r#trait::UserRepository;

#[cfg(any(test, feature = "test-support"))]
mod mock;
#[cfg(any(test, feature = "test-support"))]
pub use mock::MockUserRepository;
