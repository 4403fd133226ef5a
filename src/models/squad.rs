//! Squad model matching the WHOIS `squad` collection.

use serde::{Deserialize, Serialize};

/// A squad that persons belong to through `squad_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Squad {
    pub id: i64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub name: String,
}

/// Find the squad with the given id in a snapshot.
pub fn squad_name(squads: &[Squad], id: i64) -> Option<&str> {
    squads
        .iter()
        .find(|squad| squad.id == id)
        .map(|squad| squad.name.as_str())
}
