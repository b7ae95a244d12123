//! CORS middleware configuration for cross-origin requests.
//!
//! Development is permissive so the mobile client can be pointed at a
//! laptop. Everywhere else only origins listed in `ALLOWED_ORIGINS` are
//! accepted.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use std::env;

use nyaya_shared::Environment;

const DEFAULT_MAX_AGE: usize = 3600;

/// Creates a CORS middleware instance configured for `environment`.
///
/// # Environment Variables
/// - `ALLOWED_ORIGINS`: Comma-separated list of allowed origins (outside development)
/// - `CORS_MAX_AGE`: Max age for preflight cache (default: 3600 seconds)
pub fn create_cors(environment: Environment) -> Cors {
    let max_age = env::var("CORS_MAX_AGE")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAX_AGE);

    if environment.is_development() {
        create_development_cors(max_age)
    } else {
        let origins = env::var("ALLOWED_ORIGINS").unwrap_or_default();
        create_restricted_cors(parse_origins(&origins), max_age)
    }
}

fn create_development_cors(max_age: usize) -> Cors {
    log::info!("Configuring permissive CORS for development");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(allowed_methods())
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(max_age)
}

fn create_restricted_cors(origins: Vec<String>, max_age: usize) -> Cors {
    if origins.is_empty() {
        log::warn!("ALLOWED_ORIGINS is empty; cross-origin requests will be refused");
    }

    let mut cors = Cors::default()
        .allowed_methods(allowed_methods())
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .max_age(max_age);

    for origin in &origins {
        log::info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }

    cors
}

fn allowed_methods() -> Vec<Method> {
    vec![Method::GET, Method::POST, Method::PUT, Method::OPTIONS]
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
