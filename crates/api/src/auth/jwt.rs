//! Login token issue and verification
//!
//! Tokens are compact HS256 JWTs carrying the user's email and role, signed
//! with the process-wide secret from configuration. Every token expires:
//! issuance stamps `exp` from the configured lifetime (one hour by default)
//! and verification rejects expired tokens with zero leeway. A token minted
//! before a role change keeps its old role until it expires and the user
//! logs in again.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use super::middleware::AuthError;
use super::role::Role;

/// Claim set encoded into every login token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's email.
    pub sub: String,
    /// Role string as stored on the user row at issuance time.
    pub role: String,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

/// Issues and verifies login tokens. Cheap to clone; the keys are derived
/// once from the shared secret.
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: i64,
}

impl JwtManager {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        }
    }

    /// Sign a token for the given identity.
    pub fn issue_token(&self, email: &str, role: &Role) -> Result<String, AuthError> {
        let now = OffsetDateTime::now_utc();
        let expires_at = now + Duration::hours(self.expiry_hours);

        let claims = Claims {
            sub: email.to_string(),
            role: role.as_str().to_string(),
            iat: now.unix_timestamp(),
            exp: expires_at.unix_timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|err| {
            tracing::error!(error = %err, "failed to sign token");
            AuthError::TokenCreation
        })
    }

    /// Verify a token and return its claims.
    ///
    /// A bad signature, a malformed token, and an expired token all come
    /// back as [`AuthError::InvalidToken`].
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> JwtManager {
        JwtManager::new("test-jwt-secret-key-for-testing-only", 1)
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let manager = manager();

        let token = manager
            .issue_token("a@x.com", &Role::Student)
            .expect("Failed to issue token");
        let claims = manager.verify_token(&token).expect("Failed to verify token");

        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.role, "student");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expiry_is_one_hour_from_issuance() {
        let manager = manager();

        let token = manager.issue_token("a@x.com", &Role::Admin).unwrap();
        let claims = manager.verify_token(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let issuer = JwtManager::new("secret-one", 1);
        let verifier = JwtManager::new("secret-two", 1);

        let token = issuer.issue_token("a@x.com", &Role::Admin).unwrap();

        assert!(matches!(
            verifier.verify_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_verify_rejects_malformed_token() {
        let manager = manager();

        assert!(matches!(
            manager.verify_token("not.a.token"),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            manager.verify_token(""),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        // A negative lifetime puts exp in the past at issuance.
        let manager = JwtManager::new("test-secret", -1);

        let token = manager.issue_token("a@x.com", &Role::Student).unwrap();

        assert!(matches!(
            manager.verify_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_claims_carry_role_verbatim_string() {
        let manager = manager();

        let role = Role::Other("Mentor".to_string());
        let token = manager.issue_token("m@x.com", &role).unwrap();
        let claims = manager.verify_token(&token).unwrap();

        assert_eq!(claims.role, "Mentor");
    }
}
