//! Per-client rate limiting using the token bucket algorithm.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Token bucket parameters.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub per_second: u64,
    pub burst_size: u32,
}

/// Limits for read-mostly public endpoints: 2 requests per second, burst of 100.
pub const PUBLIC: Limits = Limits {
    per_second: 2,
    burst_size: 100,
};

/// Limits for the API: 1 request per second, burst of 30.
pub const API: Limits = Limits {
    per_second: 1,
    burst_size: 30,
};

fn governor<K>(
    key_extractor: K,
    limits: Limits,
) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>
where
    K: KeyExtractor,
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key_extractor)
            .per_second(limits.per_second)
            .burst_size(limits.burst_size)
            .finish()
            .expect("rate limit values are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Applies rate limiting to `router`, keyed by client IP.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// With `behind_proxy`, the client IP is read from `X-Forwarded-For` /
/// `X-Real-IP` / `Forwarded`; otherwise from the socket peer address, which
/// requires serving with `into_make_service_with_connect_info`.
pub fn apply<S>(router: Router<S>, behind_proxy: bool, limits: Limits) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if behind_proxy {
        router.layer(governor(SmartIpKeyExtractor, limits))
    } else {
        router.layer(governor(PeerIpKeyExtractor, limits))
    }
}
