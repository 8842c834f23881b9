//! Authenticator resolution
//!
//! Modules never construct credentials themselves; they ask an injected
//! [`CredentialProvider`] for the authenticator of the service they talk
//! to and fail before any network call when none is available. Token
//! acquisition (API-key exchange and friends) is the provider's problem,
//! outside this crate.

use std::env;

/// Credential value consumed by the service client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authenticator {
    /// No Authorization header; used against mock or trusted endpoints
    NoAuth,
    /// A pre-acquired bearer token
    Bearer(String),
}

impl Authenticator {
    /// Value for the `Authorization` header, if any
    pub fn authorization(&self) -> Option<String> {
        match self {
            Authenticator::NoAuth => None,
            Authenticator::Bearer(token) => Some(format!("Bearer {}", token)),
        }
    }
}

/// Resolves the authenticator for a named service
pub trait CredentialProvider {
    fn authenticator(&self, service_name: &str) -> Option<Authenticator>;
}

/// Environment-driven provider
///
/// `<SERVICE>_AUTH_TYPE` (service name uppercased) selects the scheme:
/// `noauth` or `bearer`, case-insensitive. Bearer tokens come from
/// `<SERVICE>_BEARER_TOKEN`. Anything else resolves to no authenticator.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialProvider for EnvCredentials {
    fn authenticator(&self, service_name: &str) -> Option<Authenticator> {
        let prefix = service_name.to_uppercase();
        let auth_type = env::var(format!("{}_AUTH_TYPE", prefix)).ok()?;

        match auth_type.to_lowercase().as_str() {
            "noauth" => Some(Authenticator::NoAuth),
            "bearer" | "bearertoken" => {
                let token = env::var(format!("{}_BEARER_TOKEN", prefix)).ok()?;
                Some(Authenticator::Bearer(token))
            }
            other => {
                tracing::warn!("Unsupported auth type {} for service {}", other, service_name);
                None
            }
        }
    }
}

/// Fixed provider for embedding engines and tests
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    authenticator: Authenticator,
}

impl StaticCredentials {
    pub fn new(authenticator: Authenticator) -> Self {
        Self { authenticator }
    }
}

impl CredentialProvider for StaticCredentials {
    fn authenticator(&self, _service_name: &str) -> Option<Authenticator> {
        Some(self.authenticator.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noauth_resolution() {
        env::set_var("AUTH_SVC_A_AUTH_TYPE", "noAuth");
        let auth = EnvCredentials.authenticator("auth_svc_a");
        assert_eq!(auth, Some(Authenticator::NoAuth));
    }

    #[test]
    fn test_bearer_resolution() {
        env::set_var("AUTH_SVC_B_AUTH_TYPE", "bearer");
        env::set_var("AUTH_SVC_B_BEARER_TOKEN", "tok-123");
        let auth = EnvCredentials.authenticator("auth_svc_b");
        assert_eq!(auth, Some(Authenticator::Bearer("tok-123".to_string())));
    }

    #[test]
    fn test_bearer_without_token_is_absent() {
        env::set_var("AUTH_SVC_C_AUTH_TYPE", "bearer");
        assert_eq!(EnvCredentials.authenticator("auth_svc_c"), None);
    }

    #[test]
    fn test_unknown_auth_type_is_absent() {
        env::set_var("AUTH_SVC_D_AUTH_TYPE", "kerberos");
        assert_eq!(EnvCredentials.authenticator("auth_svc_d"), None);
    }

    #[test]
    fn test_unset_service_is_absent() {
        assert_eq!(EnvCredentials.authenticator("auth_svc_never_set"), None);
    }

    #[test]
    fn test_authorization_header() {
        assert_eq!(Authenticator::NoAuth.authorization(), None);
        assert_eq!(
            Authenticator::Bearer("tok".to_string()).authorization(),
            Some("Bearer tok".to_string())
        );
    }
}
