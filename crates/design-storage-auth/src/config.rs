//! Authentication configuration.

use jsonwebtoken::Algorithm;

/// Trust anchor and validation rules for inbound access tokens.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// PEM-encoded public key of the token issuer.
    pub jwt_public_key_pem: String,
    /// Signature algorithm tokens must use (default: RS512).
    pub jwt_algorithm: Algorithm,
    /// Expected `iss` claim. `None` accepts any issuer.
    pub jwt_issuer: Option<String>,
    /// Reject tokens that carry no `exp` claim (default: false). A present
    /// `exp` is always checked.
    pub require_expiry: bool,
    /// Clock skew tolerated when checking `exp`, in seconds (default: 60).
    pub leeway_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_public_key_pem: String::new(),
            jwt_algorithm: Algorithm::RS512,
            jwt_issuer: None,
            require_expiry: false,
            leeway_secs: 60,
        }
    }
}
