// 🔑 Authentication
//
// Form validation always runs first. What happens after a valid form is up to
// the Authenticator: the demo one below accepts every valid form and hands back
// the demo profile. It does not check credentials against anything.

use crate::entities::AuthenticatedUser;
use crate::validation::{validate_login, ValidationError, DEFAULT_MIN_PASSWORD_LEN};
use chrono::Utc;

/// Turns a validated email/password pair into a session user
pub trait Authenticator {
    fn authenticate(&self, email: &str, password: &str) -> Result<AuthenticatedUser, ValidationError>;
}

/// Accepts any syntactically valid form. Demo only.
#[derive(Debug, Clone)]
pub struct DemoAuthenticator {
    pub min_password_len: usize,
}

impl DemoAuthenticator {
    pub fn new(min_password_len: usize) -> Self {
        DemoAuthenticator { min_password_len }
    }
}

impl Default for DemoAuthenticator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PASSWORD_LEN)
    }
}

impl Authenticator for DemoAuthenticator {
    fn authenticate(&self, email: &str, password: &str) -> Result<AuthenticatedUser, ValidationError> {
        validate_login(email, password, self.min_password_len)?;

        Ok(AuthenticatedUser {
            id: "123".to_string(),
            name: "Sarah Martin".to_string(),
            email: email.to_string(),
            avatar_initials: "SM".to_string(),
            logged_in_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_authenticator_returns_demo_profile() {
        let user = DemoAuthenticator::default().authenticate("a@b.com", "123456").unwrap();
        assert_eq!(user.id, "123");
        assert_eq!(user.name, "Sarah Martin");
        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.avatar_initials, "SM");
    }

    #[test]
    fn test_demo_authenticator_runs_validation() {
        let err = DemoAuthenticator::default().authenticate("a@b.com", "123").unwrap_err();
        assert_eq!(err, ValidationError::PasswordTooShort { min: 6 });
    }

    #[test]
    fn test_min_password_len_is_configurable() {
        let auth = DemoAuthenticator::new(3);
        assert!(auth.authenticate("a@b.com", "123").is_ok());
    }
}
