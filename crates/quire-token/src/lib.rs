//! Document access tokens.
//!
//! Two token classes share one claim shape (a registered `exp` only):
//!
//! - **Admin tokens** are signed with the process-wide secret and open every
//!   documentation.
//! - **Visitor tokens** are signed with one documentation's own secret, so a
//!   visitor token verifies only against that documentation.
//!
//! Tokens are HS256 JWTs. Validation pins the algorithm: a token whose header
//! names any other algorithm is rejected even if it is otherwise well formed.
//!
//! # Example
//!
//! ```
//! use quire_token::{DEFAULT_TTL_HOURS, TokenError, issue_visitor_token, validate};
//!
//! let issued = issue_visitor_token("doc-secret", DEFAULT_TTL_HOURS).unwrap();
//! assert!(validate(&issued.token, "doc-secret").is_ok());
//! assert!(matches!(
//!     validate(&issued.token, "other-secret"),
//!     Err(TokenError::Invalid(_))
//! ));
//! ```

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Default token lifetime used for cookies: seven days.
pub const DEFAULT_TTL_HOURS: u64 = 7 * 24;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Claims carried by admin and visitor tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentClaims {
    /// Expiry as seconds since the Unix epoch.
    pub exp: u64,
}

/// A freshly signed token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssuedToken {
    /// Encoded JWT.
    pub token: String,
    /// Expiry as seconds since the Unix epoch.
    pub expires_at: u64,
}

/// Token errors.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Bad signature, malformed token, wrong algorithm or unusable secret.
    #[error("Invalid token: {0}")]
    Invalid(String),

    /// Signature verified but the token is past its expiry.
    #[error("Token expired")]
    Expired,

    /// Signing failed.
    #[error("Failed to sign token: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Invalid(err.to_string()),
        }
    }
}

/// Issue a token valid for every documentation.
pub fn issue_admin_token(global_secret: &str, ttl_hours: u64) -> Result<IssuedToken, TokenError> {
    issue_until(global_secret, expiry_after(ttl_hours))
}

/// Issue a token valid for the documentation owning `doc_secret`.
pub fn issue_visitor_token(doc_secret: &str, ttl_hours: u64) -> Result<IssuedToken, TokenError> {
    issue_until(doc_secret, expiry_after(ttl_hours))
}

/// Issue a token with an explicit expiry timestamp.
pub fn issue_until(secret: &str, expires_at: u64) -> Result<IssuedToken, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::Signing("secret is empty".to_owned()));
    }

    let claims = DocumentClaims { exp: expires_at };
    let key = EncodingKey::from_secret(secret.as_bytes());
    let token = encode(&Header::new(ALGORITHM), &claims, &key)
        .map_err(|e| TokenError::Signing(e.to_string()))?;

    Ok(IssuedToken {
        token,
        expires_at,
    })
}

/// Verify a token's signature against `secret` and check its expiry.
///
/// An empty secret never validates anything.
pub fn validate(token: &str, secret: &str) -> Result<DocumentClaims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::Invalid("secret is empty".to_owned()));
    }

    let mut validation = Validation::new(ALGORITHM);
    validation.leeway = 0;
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp"]);

    let key = DecodingKey::from_secret(secret.as_bytes());
    let data = decode::<DocumentClaims>(token, &key, &validation)?;
    Ok(data.claims)
}

/// Current time as seconds since the Unix epoch.
pub fn now() -> u64 {
    jsonwebtoken::get_current_timestamp()
}

fn expiry_after(ttl_hours: u64) -> u64 {
    now().saturating_add(ttl_hours.saturating_mul(3600))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_visitor_token_roundtrip() {
        let issued = issue_visitor_token("S", DEFAULT_TTL_HOURS).unwrap();

        let claims = validate(&issued.token, "S").unwrap();
        assert_eq!(claims.exp, issued.expires_at);
    }

    #[test]
    fn test_ttl_is_honoured() {
        let before = now();
        let issued = issue_admin_token("global", 2).unwrap();

        assert!(issued.expires_at >= before + 2 * 3600);
        assert!(issued.expires_at <= now() + 2 * 3600);
    }

    #[test]
    fn test_default_ttl_is_one_week() {
        assert_eq!(DEFAULT_TTL_HOURS, 168);
    }

    #[test]
    fn test_secret_scope_isolation() {
        let secrets = ["doc-a", "doc-b", "doc-c"];
        for signer in secrets {
            let issued = issue_visitor_token(signer, 1).unwrap();
            for checker in secrets.iter().filter(|s| **s != signer) {
                assert!(
                    matches!(validate(&issued.token, checker), Err(TokenError::Invalid(_))),
                    "token signed with {signer} must not verify with {checker}"
                );
            }
        }
    }

    #[test]
    fn test_expired_token() {
        let issued = issue_until("S", now() - 60).unwrap();

        assert!(matches!(validate(&issued.token, "S"), Err(TokenError::Expired)));
    }

    #[test]
    fn test_expired_token_with_wrong_secret_is_invalid() {
        let issued = issue_until("S", now() - 60).unwrap();

        assert!(matches!(
            validate(&issued.token, "T"),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_malformed_token() {
        assert!(matches!(
            validate("invalid.token.here", "S"),
            Err(TokenError::Invalid(_))
        ));
        assert!(matches!(validate("", "S"), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_other_hmac_algorithm_rejected() {
        let claims = DocumentClaims { exp: now() + 3600 };
        let key = EncodingKey::from_secret(b"S");
        for alg in [Algorithm::HS384, Algorithm::HS512] {
            let token = encode(&Header::new(alg), &claims, &key).unwrap();
            assert!(
                matches!(validate(&token, "S"), Err(TokenError::Invalid(_))),
                "{alg:?} token must be rejected"
            );
        }
    }

    #[test]
    fn test_token_without_expiry_rejected() {
        #[derive(Serialize)]
        struct NoExp {
            sub: String,
        }
        let key = EncodingKey::from_secret(b"S");
        let token = encode(
            &Header::new(Algorithm::HS256),
            &NoExp {
                sub: "someone".to_owned(),
            },
            &key,
        )
        .unwrap();

        assert!(matches!(validate(&token, "S"), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            issue_visitor_token("", 1),
            Err(TokenError::Signing(_))
        ));

        let issued = issue_visitor_token("S", 1).unwrap();
        assert!(matches!(
            validate(&issued.token, ""),
            Err(TokenError::Invalid(_))
        ));
    }
}
