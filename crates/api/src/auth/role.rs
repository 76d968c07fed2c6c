//! User roles
//!
//! Roles are stored as free text in the `users` table and inside token
//! claims. They are parsed into this enum once at the boundary,
//! case-insensitively (the data contains both "admin" and "Admin"), and
//! compared as the enum from then on.

/// Parsed user role. Anything other than the two known roles is carried
/// through verbatim in `Other` and grants no privileges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Admin,
    Student,
    Other(String),
}

impl Role {
    /// Parse a raw role string, normalizing case and surrounding whitespace.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            "student" => Role::Student,
            _ => Role::Other(raw.to_string()),
        }
    }

    /// Canonical string form, as written into token claims.
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Student => "student",
            Role::Other(raw) => raw,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Role::parse("admin"), Role::Admin);
        assert_eq!(Role::parse("Admin"), Role::Admin);
        assert_eq!(Role::parse("ADMIN"), Role::Admin);
        assert_eq!(Role::parse("Student"), Role::Student);
        assert_eq!(Role::parse("student"), Role::Student);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(Role::parse(" admin "), Role::Admin);
    }

    #[test]
    fn test_unknown_role_is_preserved_verbatim() {
        let role = Role::parse("Teaching-Assistant");
        assert_eq!(role, Role::Other("Teaching-Assistant".to_string()));
        assert_eq!(role.as_str(), "Teaching-Assistant");
        assert!(!role.is_admin());
    }

    #[test]
    fn test_only_admin_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Student.is_admin());
        assert!(!Role::parse("administrator").is_admin());
    }

    #[test]
    fn test_canonical_form_is_lowercase() {
        assert_eq!(Role::parse("Admin").as_str(), "admin");
        assert_eq!(Role::parse("STUDENT").as_str(), "student");
    }
}
