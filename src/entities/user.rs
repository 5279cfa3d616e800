// 🔐 Authenticated user - the single active session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,
    pub name: String,
    pub email: String,

    /// Two-letter avatar label ("SM")
    pub avatar_initials: String,
    pub logged_in_at: DateTime<Utc>,
}

impl AuthenticatedUser {
    /// "Sarah Martin" → "Sarah"
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sarah() -> AuthenticatedUser {
        AuthenticatedUser {
            id: "123".to_string(),
            name: "Sarah Martin".to_string(),
            email: "sarah@example.com".to_string(),
            avatar_initials: "SM".to_string(),
            logged_in_at: Utc::now(),
        }
    }

    #[test]
    fn test_first_name() {
        let user = sarah();
        assert_eq!(user.first_name(), "Sarah");
    }
}
