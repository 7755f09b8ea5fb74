//! Credential cascade for documentation requests.
//!
//! Each tier is an [`Authenticator`] that inspects one kind of credential and
//! answers with an [`Outcome`]. Tiers run in order and the first
//! [`Outcome::Authorized`] wins. Invalid credentials are logged and the
//! cascade moves on.
//!
//! Default order:
//!
//! 1. `adminToken` cookies, checked against the global secret
//! 2. `visitorToken` cookies, checked against the documentation secret
//! 3. the `jwt_token` query parameter, checked against the documentation
//!    secret; success also mints a fresh visitor cookie

use axum::http::HeaderMap;
use quire_docs::{AuthService, DocumentationMetadata};
use quire_token::{DEFAULT_TTL_HOURS, IssuedToken};

use crate::cookies::{self, ADMIN_COOKIE, VISITOR_COOKIE};

/// Credentials carried by one request.
#[derive(Debug, Default)]
pub(crate) struct Credentials<'a> {
    pub(crate) admin_cookies: Vec<&'a str>,
    pub(crate) visitor_cookies: Vec<&'a str>,
    pub(crate) query_token: Option<String>,
}

impl<'a> Credentials<'a> {
    /// Extract token cookies from `headers`.
    pub(crate) fn from_headers(headers: &'a HeaderMap, query_token: Option<String>) -> Self {
        Self {
            admin_cookies: cookies::values(headers, ADMIN_COOKIE),
            visitor_cookies: cookies::values(headers, VISITOR_COOKIE),
            query_token: query_token.filter(|t| !t.is_empty()),
        }
    }
}

/// Why a request was let through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Reason {
    /// Documentation does not require authentication.
    OpenAccess,
    Admin,
    VisitorCookie,
    QueryToken,
}

impl Reason {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::OpenAccess => "open-access",
            Self::Admin => "admin",
            Self::VisitorCookie => "visitor-cookie",
            Self::QueryToken => "query-token",
        }
    }
}

/// Successful authentication by one tier.
#[derive(Debug)]
pub(crate) struct Grant {
    pub(crate) reason: Reason,
    /// Visitor token to hand back as a cookie.
    pub(crate) visitor_token: Option<IssuedToken>,
}

/// Result of one tier.
#[derive(Debug)]
pub(crate) enum Outcome {
    Authorized(Grant),
    /// The request carries no credential of this kind.
    NotApplicable,
    /// Credentials of this kind are present but none is valid.
    Denied,
}

/// One tier of the cascade.
pub(crate) trait Authenticator: Send + Sync {
    fn authenticate(
        &self,
        credentials: &Credentials<'_>,
        doc: &DocumentationMetadata,
        auth: &AuthService,
    ) -> Outcome;
}

/// Check `tokens` in order against `secret`; the first valid one wins.
fn check_tokens<'t>(
    tokens: impl IntoIterator<Item = &'t str>,
    secret: &str,
    doc_id: u32,
    source: &'static str,
    reason: Reason,
) -> Outcome {
    let mut outcome = Outcome::NotApplicable;
    for token in tokens {
        match quire_token::validate(token, secret) {
            Ok(_) => {
                return Outcome::Authorized(Grant {
                    reason,
                    visitor_token: None,
                });
            }
            Err(e) => {
                tracing::error!(doc_id, source, error = %e, "Rejected documentation token");
                outcome = Outcome::Denied;
            }
        }
    }
    outcome
}

/// `adminToken` cookies signed with the global secret.
pub(crate) struct AdminCookie;

impl Authenticator for AdminCookie {
    fn authenticate(
        &self,
        credentials: &Credentials<'_>,
        doc: &DocumentationMetadata,
        auth: &AuthService,
    ) -> Outcome {
        check_tokens(
            credentials.admin_cookies.iter().copied(),
            auth.global_secret(),
            doc.id,
            ADMIN_COOKIE,
            Reason::Admin,
        )
    }
}

/// `visitorToken` cookies signed with the documentation secret.
pub(crate) struct VisitorCookie;

impl Authenticator for VisitorCookie {
    fn authenticate(
        &self,
        credentials: &Credentials<'_>,
        doc: &DocumentationMetadata,
        _auth: &AuthService,
    ) -> Outcome {
        check_tokens(
            credentials.visitor_cookies.iter().copied(),
            &doc.token_secret,
            doc.id,
            VISITOR_COOKIE,
            Reason::VisitorCookie,
        )
    }
}

/// `jwt_token` query parameter signed with the documentation secret.
pub(crate) struct QueryToken;

impl Authenticator for QueryToken {
    fn authenticate(
        &self,
        credentials: &Credentials<'_>,
        doc: &DocumentationMetadata,
        _auth: &AuthService,
    ) -> Outcome {
        let mut result = check_tokens(
            credentials.query_token.as_deref(),
            &doc.token_secret,
            doc.id,
            "jwt_token",
            Reason::QueryToken,
        );

        if let Outcome::Authorized(grant) = &mut result {
            match quire_token::issue_visitor_token(&doc.token_secret, DEFAULT_TTL_HOURS) {
                Ok(issued) => grant.visitor_token = Some(issued),
                Err(e) => {
                    tracing::error!(doc_id = doc.id, error = %e, "Failed to issue visitor token");
                }
            }
        }
        result
    }
}

/// Decision for one request.
#[derive(Debug)]
pub(crate) struct Verdict {
    /// `None` when the request is unauthorized.
    pub(crate) reason: Option<Reason>,
    pub(crate) visitor_token: Option<IssuedToken>,
}

/// Ordered list of [`Authenticator`]s.
pub(crate) struct AccessResolver {
    tiers: Vec<Box<dyn Authenticator>>,
}

impl Default for AccessResolver {
    fn default() -> Self {
        Self::with_tiers(vec![
            Box::new(AdminCookie),
            Box::new(VisitorCookie),
            Box::new(QueryToken),
        ])
    }
}

impl AccessResolver {
    pub(crate) fn with_tiers(tiers: Vec<Box<dyn Authenticator>>) -> Self {
        Self { tiers }
    }

    /// Decide whether the request may view `doc`.
    ///
    /// Open documentation is always allowed without consulting credentials.
    pub(crate) fn resolve(
        &self,
        credentials: &Credentials<'_>,
        doc: &DocumentationMetadata,
        auth: &AuthService,
    ) -> Verdict {
        if !doc.require_auth {
            return Verdict {
                reason: Some(Reason::OpenAccess),
                visitor_token: None,
            };
        }

        for tier in &self.tiers {
            if let Outcome::Authorized(grant) = tier.authenticate(credentials, doc, auth) {
                return Verdict {
                    reason: Some(grant.reason),
                    visitor_token: grant.visitor_token,
                };
            }
        }

        Verdict {
            reason: None,
            visitor_token: None,
        }
    }
}
