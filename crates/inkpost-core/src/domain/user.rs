use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity - an author of posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for registering a user. The store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: String,
}

/// Changes applied by `updateUser`.
///
/// `name: None` leaves the stored name untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: String,
}

impl User {
    /// Apply an update in place, bumping `updated_at`.
    pub fn apply(&mut self, update: UserUpdate) {
        if let Some(name) = update.name {
            self.name = Some(name);
        }
        self.email = update.email;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        let now = Utc::now();
        User {
            id: 1,
            name: Some("Alice".to_string()),
            email: "alice@inkpost.dev".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn apply_keeps_name_when_absent() {
        let mut u = user();
        u.apply(UserUpdate {
            name: None,
            email: "alice@new.dev".to_string(),
        });
        assert_eq!(u.name.as_deref(), Some("Alice"));
        assert_eq!(u.email, "alice@new.dev");
    }

    #[test]
    fn apply_overwrites_name_when_present() {
        let mut u = user();
        u.apply(UserUpdate {
            name: Some("Al".to_string()),
            email: u.email.clone(),
        });
        assert_eq!(u.name.as_deref(), Some("Al"));
    }
}
