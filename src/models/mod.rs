//! Data models for the WHOIS directory.
//!
//! These models mirror the records served by the remote WHOIS API.

mod custom;
mod person;
mod squad;

pub use custom::*;
pub use person::*;
pub use squad::*;

use serde::{Deserialize, Deserializer};

/// Response envelope used by every WHOIS API endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
