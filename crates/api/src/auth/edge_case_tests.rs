//! Edge Case Tests for the Authentication System
//!
//! Tests boundary conditions in:
//! - Token verification (tampering, empty values, segment damage)
//! - Role normalization at the claims boundary
//! - Claim fidelity for unusual but legal inputs

#[cfg(test)]
mod token_tests {
    use super::super::jwt::JwtManager;
    use super::super::middleware::AuthError;
    use super::super::role::Role;

    fn manager() -> JwtManager {
        JwtManager::new("edge-case-test-secret", 1)
    }

    // =========================================================================
    // An empty header value must be rejected, not treated as "missing"
    // =========================================================================
    #[test]
    fn test_empty_token_is_invalid() {
        let result = manager().verify_token("");
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    // =========================================================================
    // A tampered payload invalidates the signature
    // =========================================================================
    #[test]
    fn test_tampered_payload_is_rejected() {
        let manager = manager();
        let token = manager.issue_token("a@x.com", &Role::Student).unwrap();

        let mut parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3, "JWT must have three segments");

        // Swap in a differently-signed payload segment.
        let other = manager.issue_token("b@x.com", &Role::Admin).unwrap();
        let other_parts: Vec<&str> = other.split('.').collect();
        parts[1] = other_parts[1];
        let forged = parts.join(".");

        assert!(matches!(
            manager.verify_token(&forged),
            Err(AuthError::InvalidToken)
        ));
    }

    // =========================================================================
    // A token missing its signature segment is malformed
    // =========================================================================
    #[test]
    fn test_truncated_token_is_rejected() {
        let manager = manager();
        let token = manager.issue_token("a@x.com", &Role::Student).unwrap();

        let truncated = token
            .rsplit_once('.')
            .map(|(head, _)| head.to_string())
            .unwrap();

        assert!(matches!(
            manager.verify_token(&truncated),
            Err(AuthError::InvalidToken)
        ));
    }

    // =========================================================================
    // Claims survive unusual but legal emails unchanged
    // =========================================================================
    #[test]
    fn test_plus_addressed_email_round_trips() {
        let manager = manager();
        let email = "first.last+courses@sub.example.co.in";

        let token = manager.issue_token(email, &Role::Student).unwrap();
        let claims = manager.verify_token(&token).unwrap();

        assert_eq!(claims.sub, email);
    }
}

#[cfg(test)]
mod role_tests {
    use super::super::role::Role;

    // =========================================================================
    // Mixed-case and padded role strings normalize at the boundary
    // =========================================================================
    #[test]
    fn test_role_normalization_boundary_values() {
        for raw in ["admin", "Admin", "ADMIN", "aDmIn", "  admin", "admin  "] {
            assert!(Role::parse(raw).is_admin(), "{raw:?} should be admin");
        }
    }

    // =========================================================================
    // Near-miss role strings grant nothing
    // =========================================================================
    #[test]
    fn test_role_near_misses_are_not_admin() {
        for raw in ["admins", "administrator", "ad min", "admin1", ""] {
            assert!(!Role::parse(raw).is_admin(), "{raw:?} should not be admin");
        }
    }
}
