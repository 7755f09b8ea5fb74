//! Token cookies.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use cookie::time::Duration;
use cookie::{Cookie, SameSite};
use quire_config::{CookieConfig, SameSite as ConfiguredSameSite};

/// Cookie carrying an admin token.
pub(crate) const ADMIN_COOKIE: &str = "adminToken";

/// Cookie carrying a visitor token.
pub(crate) const VISITOR_COOKIE: &str = "visitorToken";

/// Build a token cookie with the configured attributes.
pub(crate) fn token_cookie(
    name: &'static str,
    token: String,
    config: &CookieConfig,
) -> Cookie<'static> {
    let mut builder = Cookie::build((name, token))
        .path(config.path.clone())
        .max_age(Duration::days(i64::from(config.age_days)))
        .secure(config.secure)
        .http_only(config.http_only)
        .same_site(match config.same_site {
            ConfiguredSameSite::Lax => SameSite::Lax,
            ConfiguredSameSite::Strict => SameSite::Strict,
            ConfiguredSameSite::None => SameSite::None,
        });

    if !config.domain.is_empty() {
        builder = builder.domain(config.domain.clone());
    }

    builder.build()
}

/// Collect every non-empty value of cookie `name`.
///
/// Browsers may send the same name more than once (e.g. for different
/// paths), so all occurrences are returned in header order.
pub(crate) fn values<'a>(headers: &'a HeaderMap, name: &str) -> Vec<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key.trim() == name).then(|| value.trim())
        })
        .filter(|value| !value.is_empty())
        .collect()
}
