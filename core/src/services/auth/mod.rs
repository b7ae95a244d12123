//! Authentication service module
//!
//! Registration, login, and the two audited administrative mutations of a
//! user: credential reset and role change.

mod service;


pub use service::{AuthService, RegisterRequest};
