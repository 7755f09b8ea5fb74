//! Global signing secret.

/// Holds the process-wide secret admin tokens are signed with.
#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
}

impl AuthService {
    /// Create the service from an already loaded secret.
    #[must_use]
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
        }
    }

    /// Secret for admin tokens.
    #[must_use]
    pub fn global_secret(&self) -> &str {
        &self.jwt_secret
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let auth = AuthService::new("hunter2");
        assert_eq!(auth.global_secret(), "hunter2");
        assert!(!format!("{auth:?}").contains("hunter2"));
    }
}
