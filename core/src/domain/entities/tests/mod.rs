//! Unit tests for domain entities

mod audit_tests;
mod token_tests;
mod user_tests;
