//! Route handlers, one module per resource

pub mod admin;
pub mod audit;
pub mod auth;
pub mod cases;
pub mod evidence;
pub mod health;
