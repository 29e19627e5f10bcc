use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A participant. The phone number is the natural key.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(rename = "firebaseUid", default, skip_serializing_if = "Option::is_none")]
    pub firebase_uid: Option<String>,
    #[serde(rename = "joinedAt")]
    pub joined_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: &str, phone: &str, firebase_uid: Option<String>) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
            firebase_uid,
            joined_at: Utc::now(),
        }
    }

    pub fn needs_auth_id_update(&self, firebase_uid: &str) -> bool {
        self.firebase_uid.as_deref() != Some(firebase_uid)
    }
}

#[cfg(test)]
impl User {
    pub fn test_user(name: &str, phone: &str) -> Self {
        User::new(name, phone, Some(format!("uid-{}", phone)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("Asha", "9876543210", None);

        assert_eq!(user.name, "Asha");
        assert_eq!(user.phone, "9876543210");
        assert!(!user.id.is_empty());
        assert!(user.joined_at <= Utc::now());
    }

    #[test]
    fn auth_id_update_needed_when_missing_or_changed() {
        let mut user = User::test_user("Asha", "9876543210");
        assert!(!user.needs_auth_id_update("uid-9876543210"));
        assert!(user.needs_auth_id_update("uid-other"));

        user.firebase_uid = None;
        assert!(user.needs_auth_id_update("uid-9876543210"));
    }
}
