use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use uuid::Uuid;

string_enum! {
    #[derive(Default)]
    pub enum UserObject {
        #[default]
        User => "user",
    }
}

/// A workspace member or integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub object: UserObject,
    pub id: Uuid,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(flatten)]
    pub kind: UserKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UserKind {
    Person { person: PersonDetails },
    Bot { bot: BotDetails },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PersonDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BotDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_name: Option<String>,
}

impl User {
    pub fn email(&self) -> Option<&str> {
        match &self.kind {
            UserKind::Person { person } => person.email.as_deref(),
            UserKind::Bot { .. } => None,
        }
    }

    /// `{id, name, email}` record used by the reductions.
    pub fn reduce(&self) -> Value {
        json!({
            "id": self.id.to_string(),
            "name": self.name,
            "email": self.email(),
        })
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, self.email()) {
            (Some(name), _) => write!(f, "{}", name),
            (None, Some(email)) => write!(f, "{}", email),
            (None, None) => write!(f, "User {}", self.id),
        }
    }
}

/// The `{object, id}` stub attached to blocks as `created_by`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialUser {
    #[serde(default)]
    pub object: UserObject,
    pub id: Uuid,
}
