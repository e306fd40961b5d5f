//! Login rate limiting middleware.

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::{
    collections::HashMap,
    net::SocketAddr,
    num::NonZeroU32,
    sync::{Arc, RwLock},
};

use crate::web::error::ApiError;

/// Per-client rate limiter using Governor.
pub type ClientRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// State for login rate limiting.
pub struct LoginRateLimit {
    /// Per-client rate limiters.
    limiters: RwLock<HashMap<String, Arc<ClientRateLimiter>>>,
    /// Allowed login attempts per minute per client.
    per_minute: u32,
    /// Key clients by proxy headers instead of the peer address.
    trust_proxy_headers: bool,
}

impl LoginRateLimit {
    /// Create a new rate limit state.
    ///
    /// `X-Forwarded-For` and `X-Real-IP` are only honored when
    /// `trust_proxy_headers` is set.
    pub fn new(per_minute: u32, trust_proxy_headers: bool) -> Self {
        Self {
            limiters: RwLock::new(HashMap::new()),
            per_minute,
            trust_proxy_headers,
        }
    }

    /// Get or create the rate limiter for the given client.
    fn limiter(&self, client: &str) -> Arc<ClientRateLimiter> {
        {
            let read_guard = self.limiters.read().unwrap_or_else(|e| e.into_inner());
            if let Some(limiter) = read_guard.get(client) {
                return limiter.clone();
            }
        }

        let mut write_guard = self.limiters.write().unwrap_or_else(|e| e.into_inner());

        // Double-check after acquiring write lock
        if let Some(limiter) = write_guard.get(client) {
            return limiter.clone();
        }

        let quota = Quota::per_minute(NonZeroU32::new(self.per_minute).unwrap_or(NonZeroU32::MIN));
        let limiter = Arc::new(RateLimiter::direct(quota));
        write_guard.insert(client.to_string(), limiter.clone());
        limiter
    }

    /// Check if a login attempt is allowed for the client.
    pub fn check(&self, client: &str) -> bool {
        self.limiter(client).check().is_ok()
    }
}

/// Extract client address from request.
fn client_address(req: &Request<Body>, trust_proxy_headers: bool) -> String {
    if trust_proxy_headers {
        if let Some(client) = proxy_client_address(req) {
            return client;
        }
    }

    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    "unknown".to_string()
}

fn proxy_client_address(req: &Request<Body>) -> Option<String> {
    if let Some(forwarded) = req
        .headers()
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(ip) = forwarded.split(',').next() {
            return Some(ip.trim().to_string());
        }
    }

    req.headers()
        .get("X-Real-IP")
        .and_then(|v| v.to_str().ok())
        .map(|ip| ip.trim().to_string())
}

/// Rate limiting middleware for the login endpoint.
pub async fn login_rate_limit(
    state: Arc<LoginRateLimit>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let client = client_address(&req, state.trust_proxy_headers);

    if !state.check(&client) {
        tracing::warn!(client = %client, "Login rate limit exceeded");
        return ApiError::too_many_requests("Too many login attempts. Please try again later.")
            .into_response();
    }

    next.run(req).await
}
