//! Firm-scoped authorization.

mod gate;

pub use gate::{Action, AuthorizationGate, Decision, DenyReason};
