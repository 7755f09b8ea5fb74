//! CORS layer built from configuration.

use std::str::FromStr;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use quire_config::CorsConfig;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Build the CORS layer.
///
/// A `*` origin combined with credentials mirrors the request origin.
pub(crate) fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let any_origin = config.allowed_origins.iter().any(|origin| origin == "*");
    let origin = match (any_origin, config.allow_credentials) {
        (true, true) => AllowOrigin::mirror_request(),
        (true, false) => AllowOrigin::any(),
        (false, _) => {
            AllowOrigin::list(parse_all::<HeaderValue>(&config.allowed_origins, "origin"))
        }
    };

    let mut layer = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(parse_all::<Method>(&config.allowed_methods, "method"))
        .allow_headers(parse_all::<HeaderName>(&config.allowed_headers, "header"))
        .expose_headers(parse_all::<HeaderName>(&config.exposed_headers, "header"))
        .allow_credentials(config.allow_credentials);

    if config.max_age_secs > 0 {
        layer = layer.max_age(Duration::from_secs(config.max_age_secs));
    }

    layer
}

/// Parse every entry, skipping (and logging) the ones that are malformed.
fn parse_all<T: FromStr>(values: &[String], kind: &'static str) -> Vec<T> {
    values
        .iter()
        .filter_map(|value| {
            let parsed: Option<T> = value.parse().ok();
            if parsed.is_none() {
                tracing::warn!(kind, value = %value, "Ignoring invalid CORS entry");
            }
            parsed
        })
        .collect()
}
