//! Security middleware for HTTPS enforcement and response hardening headers.
//!
//! Both behaviours are switched on outside development. Requests arriving
//! over plain HTTP are only accepted when a trusted proxy vouches for TLS
//! through `X-Forwarded-Proto`.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorForbidden,
    http::header::{HeaderName, HeaderValue},
    Error,
};
use futures_util::future::LocalBoxFuture;
use std::{
    env,
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use nyaya_shared::Environment;

const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("strict-transport-security", "max-age=31536000; includeSubDomains"),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "no-referrer"),
    ("content-security-policy", "default-src 'none'; frame-ancestors 'none'"),
    ("cache-control", "no-store"),
];

/// Security middleware factory
#[derive(Debug, Clone)]
pub struct SecurityMiddleware {
    enforce_https: bool,
    add_security_headers: bool,
    /// Peers whose `X-Forwarded-Proto` is believed
    trusted_proxies: Rc<Vec<String>>,
}

impl SecurityMiddleware {
    /// Configure from the environment; `TRUSTED_PROXIES` is a comma-separated IP list
    pub fn for_environment(environment: Environment) -> Self {
        let hardened = !environment.is_development();
        let trusted_proxies = env::var("TRUSTED_PROXIES")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        log::info!(
            "Security middleware configured: enforce_https={}, trusted_proxies={}",
            hardened,
            trusted_proxies.len()
        );

        Self {
            enforce_https: hardened,
            add_security_headers: hardened,
            trusted_proxies: Rc::new(trusted_proxies),
        }
    }

    /// Headers only, no HTTPS enforcement
    pub fn headers_only() -> Self {
        Self {
            enforce_https: false,
            add_security_headers: true,
            trusted_proxies: Rc::new(Vec::new()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityMiddlewareService {
            service: Rc::new(service),
            config: self.clone(),
        }))
    }
}

/// Security middleware service implementation
pub struct SecurityMiddlewareService<S> {
    service: Rc<S>,
    config: SecurityMiddleware,
}

impl<S, B> Service<ServiceRequest> for SecurityMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let add_security_headers = self.config.add_security_headers;

        if self.config.enforce_https && !is_secure_request(&req, &self.config.trusted_proxies) {
            log::warn!("Insecure request blocked: {} {}", req.method(), req.path());
            return Box::pin(async { Err(ErrorForbidden("HTTPS required")) });
        }

        Box::pin(async move {
            let mut response = service.call(req).await?;
            if add_security_headers {
                let headers = response.headers_mut();
                for &(name, value) in SECURITY_HEADERS {
                    headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
                }
            }
            Ok(response)
        })
    }
}

/// HTTPS directly, HTTPS through a trusted proxy, or loopback
fn is_secure_request(req: &ServiceRequest, trusted_proxies: &[String]) -> bool {
    // connection_info() already trusts forwarding headers from anyone
    if req.app_config().secure() {
        return true;
    }

    let forwarded_https = req
        .headers()
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .map(|proto| proto.eq_ignore_ascii_case("https"))
        .unwrap_or(false);
    if forwarded_https {
        let peer = req.peer_addr().map(|addr| addr.ip().to_string());
        if peer.map_or(false, |ip| trusted_proxies.iter().any(|trusted| *trusted == ip)) {
            return true;
        }
    }

    req.peer_addr().map_or(false, |addr| addr.ip().is_loopback())
}
