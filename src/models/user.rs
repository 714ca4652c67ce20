use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{de_timestamp, epoch, macros::str_opt_ref, ser_timestamp};

/// A user profile, as served by `/v0/user/<id>.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user's unique, case-sensitive username.
    id: String,

    /// Creation date of the account.
    #[serde(
        default = "epoch",
        serialize_with = "ser_timestamp",
        deserialize_with = "de_timestamp"
    )]
    created: DateTime<Utc>,

    /// The user's karma.
    #[serde(default)]
    karma: i64,

    /// The user's self-description. HTML.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    about: Option<String>,

    /// Ids of the user's stories, polls and comments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    submitted: Vec<u32>,
}

impl User {
    /// Returns the username.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns when the account was created.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Returns the user's karma.
    pub fn karma(&self) -> i64 {
        self.karma
    }

    /// Returns the user's self-description (if set).
    pub fn about(&self) -> Option<&str> {
        str_opt_ref!(self.about)
    }

    /// Returns ids of everything the user submitted.
    pub fn submitted(&self) -> &[u32] {
        &self.submitted
    }
}

#[cfg(feature = "display")]
impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (karma {}, joined {})",
            self.id,
            self.karma,
            self.created.date_naive()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::User;

    #[test]
    fn profile() {
        let raw = r#"{"about": "This is a test", "created": 1173923446,
            "id": "jl", "karma": 2937, "submitted": [8265435, 8168423]}"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user.id(), "jl");
        assert_eq!(user.karma(), 2937);
        assert_eq!(user.about(), Some("This is a test"));
        assert_eq!(user.submitted(), &[8_265_435, 8_168_423]);
        assert_eq!(user.created().timestamp(), 1_173_923_446);
    }

    #[test]
    fn serializes_back_to_api_layout() {
        let raw = r#"{"created": 1173923446, "id": "jl", "karma": 2937}"#;
        let user: User = serde_json::from_str(raw).unwrap();

        let written = serde_json::to_string(&user).unwrap();
        assert_eq!(written, r#"{"id":"jl","created":1173923446,"karma":2937}"#);

        let reread: User = serde_json::from_str(&written).unwrap();
        assert_eq!(reread, user);
    }
}
