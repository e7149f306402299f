//! Records held by the store

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a [`UserRecord`], carried as the `sub` claim of a token
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Registered user
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub password: String,
    pub company_id: String,
}

// Password is omitted from debug output
impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("company_id", &self.company_id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub company_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Fields of a job supplied by the caller; ownership is stamped by the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewJob {
    pub title: String,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_display() {
        let id = UserId::new("7");
        assert_eq!(id.to_string(), "7");
        assert_eq!(id.as_str(), "7");
    }

    #[test]
    fn test_user_id_serde_transparent() {
        let id: UserId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(id, UserId::from("abc"));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }

    #[test]
    fn test_user_record_debug_hides_password() {
        let user = UserRecord {
            id: UserId::from("7"),
            email: "a@x.com".to_string(),
            password: "secret".to_string(),
            company_id: "42".to_string(),
        };
        let debug_str = format!("{user:?}");
        assert!(debug_str.contains("a@x.com"));
        assert!(!debug_str.contains("secret"));
    }

    #[test]
    fn test_job_deserialize_camel_case() {
        let json = r#"{"id": "j1", "companyId": "c1", "title": "Engineer"}"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.company_id, "c1");
        assert!(job.description.is_none());
    }
}
