//! Person model matching the WHOIS `person` collection.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Avatar shown when a person has none of their own.
pub const DEFAULT_AVATAR: &str = "/pfp.svg";

/// A person record as returned by the WHOIS API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub squad_id: Option<i64>,
    /// JSON-encoded sub-document, normally a string
    #[serde(default)]
    pub custom: Option<Value>,
    /// Remaining remote fields (prefix, surname, bio, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Person {
    /// Look up a textual remote field that is not modelled explicitly.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.extra
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Full display name including prefix and surname when present.
    pub fn full_name(&self) -> String {
        [self.field("prefix"), Some(self.name.as_str()), self.field("surname")]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A person decorated with a resolved avatar, ready for rendering.
#[derive(Debug, Clone)]
pub struct PersonView {
    pub person: Person,
    pub avatar: String,
}

impl From<Person> for PersonView {
    fn from(person: Person) -> Self {
        let avatar = resolve_avatar(&person);
        Self { person, avatar }
    }
}

/// Avatar to display for a person, falling back to [`DEFAULT_AVATAR`].
pub fn resolve_avatar(person: &Person) -> String {
    match person.avatar.as_deref() {
        Some(avatar) if !avatar.is_empty() => avatar.to_string(),
        _ => DEFAULT_AVATAR.to_string(),
    }
}
