//! The `custom` sub-document stored on a person and the emoji reactions kept in it.

use serde_json::{Map, Value};

/// Key under which reaction counters are stored.
pub const EMOJIS_KEY: &str = "emojis";

/// An emoji reaction a visitor can leave on a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    StarEyes,
    GlassesEyes,
}

impl Reaction {
    pub const ALL: [Reaction; 2] = [Reaction::StarEyes, Reaction::GlassesEyes];

    /// Parse the value posted by the reaction form.
    pub fn from_form_value(value: &str) -> Option<Self> {
        match value {
            "star-eyes" => Some(Reaction::StarEyes),
            "glasses-eyes" => Some(Reaction::GlassesEyes),
            _ => None,
        }
    }

    /// Value used by the reaction form.
    pub fn form_value(&self) -> &'static str {
        match self {
            Reaction::StarEyes => "star-eyes",
            Reaction::GlassesEyes => "glasses-eyes",
        }
    }

    /// Key of the counter inside `custom.emojis`.
    pub fn counter_key(&self) -> &'static str {
        match self {
            Reaction::StarEyes => "starEyes",
            Reaction::GlassesEyes => "glassesEyes",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Reaction::StarEyes => "\u{1F929}",
            Reaction::GlassesEyes => "\u{1F913}",
        }
    }
}

/// Decoded form of a person's `custom` field.
///
/// Decoding is total: whatever the remote record holds, the result is a
/// usable object. Keys other than `emojis` are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomData {
    fields: Map<String, Value>,
}

impl CustomData {
    /// Decode the raw `custom` value of a person record.
    ///
    /// A JSON string is parsed, an object is taken as is, and anything else
    /// (absent, null, unparsable, non-object) yields an empty document.
    pub fn decode(raw: Option<&Value>) -> Self {
        let parsed = match raw {
            Some(Value::String(text)) => match serde_json::from_str::<Value>(text) {
                Ok(value) => value,
                Err(e) => {
                    tracing::debug!("Ignoring unparsable custom field: {}", e);
                    Value::Null
                }
            },
            Some(value) => value.clone(),
            None => Value::Null,
        };

        match parsed {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }

    /// Encode back to the string form stored remotely.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.fields)
    }

    /// Current value of a reaction counter, zero when absent or unusable.
    pub fn count(&self, reaction: Reaction) -> i64 {
        self.fields
            .get(EMOJIS_KEY)
            .and_then(Value::as_object)
            .and_then(|emojis| emojis.get(reaction.counter_key()))
            .map(counter_value)
            .unwrap_or(0)
    }

    /// Increment a reaction counter, creating the counter container as needed.
    pub fn add_reaction(&mut self, reaction: Reaction) -> i64 {
        let mut emojis = self.take_emojis();
        let next = emojis
            .get(reaction.counter_key())
            .map(counter_value)
            .unwrap_or(0)
            .saturating_add(1);
        emojis.insert(reaction.counter_key().to_string(), Value::from(next));
        self.fields
            .insert(EMOJIS_KEY.to_string(), Value::Object(emojis));
        next
    }

    /// Reset `emojis` to an empty object unless it already is a counter container.
    pub fn normalize(&mut self) {
        let emojis = self.take_emojis();
        self.fields
            .insert(EMOJIS_KEY.to_string(), Value::Object(emojis));
    }

    fn take_emojis(&mut self) -> Map<String, Value> {
        match self.fields.remove(EMOJIS_KEY) {
            Some(Value::Object(emojis)) => emojis,
            _ => Map::new(),
        }
    }
}

/// Read a stored counter; falsy or non-numeric values count as zero.
fn counter_value(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        Value::Bool(true) => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decoded(raw: &str) -> CustomData {
        CustomData::decode(Some(&Value::String(raw.to_string())))
    }

    fn encoded(data: &CustomData) -> Value {
        serde_json::from_str(&data.encode().unwrap()).unwrap()
    }

    #[test]
    fn test_reaction_from_form_value() {
        assert_eq!(Reaction::from_form_value("star-eyes"), Some(Reaction::StarEyes));
        assert_eq!(
            Reaction::from_form_value("glasses-eyes"),
            Some(Reaction::GlassesEyes)
        );
        assert_eq!(Reaction::from_form_value("unknown"), None);
        assert_eq!(Reaction::from_form_value(""), None);
    }

    #[test]
    fn test_decode_absent_is_empty() {
        assert_eq!(CustomData::decode(None), CustomData::default());
        assert_eq!(CustomData::decode(Some(&Value::Null)), CustomData::default());
    }

    #[test]
    fn test_decode_invalid_json_is_empty() {
        let mut data = decoded("not valid json");
        assert_eq!(data, CustomData::default());

        data.add_reaction(Reaction::StarEyes);
        assert_eq!(encoded(&data), json!({ "emojis": { "starEyes": 1 } }));
    }

    #[test]
    fn test_decode_non_object_is_empty() {
        assert_eq!(decoded("[1,2,3]"), CustomData::default());
        assert_eq!(decoded("42"), CustomData::default());
    }

    #[test]
    fn test_decode_accepts_object_value() {
        let data = CustomData::decode(Some(&json!({ "emojis": { "glassesEyes": 2 } })));
        assert_eq!(data.count(Reaction::GlassesEyes), 2);
    }

    #[test]
    fn test_increment_existing_counter() {
        let mut data = decoded(r#"{"emojis":{"starEyes":3}}"#);
        assert_eq!(data.add_reaction(Reaction::StarEyes), 4);
        assert_eq!(data.encode().unwrap(), r#"{"emojis":{"starEyes":4}}"#);
    }

    #[test]
    fn test_emojis_true_is_reset() {
        let mut data = decoded(r#"{"emojis":true,"theme":"dark"}"#);
        data.normalize();
        assert_eq!(encoded(&data), json!({ "emojis": {}, "theme": "dark" }));

        data.add_reaction(Reaction::GlassesEyes);
        assert_eq!(
            encoded(&data),
            json!({ "emojis": { "glassesEyes": 1 }, "theme": "dark" })
        );
    }

    #[test]
    fn test_falsy_counter_starts_at_zero() {
        let mut data = decoded(r#"{"emojis":{"starEyes":null,"glassesEyes":"5"}}"#);
        assert_eq!(data.add_reaction(Reaction::StarEyes), 1);
        assert_eq!(data.add_reaction(Reaction::GlassesEyes), 6);
    }

    #[test]
    fn test_counter_at_maximum_does_not_overflow() {
        let mut data = decoded(r#"{"emojis":{"starEyes":9223372036854775807}}"#);
        assert_eq!(data.add_reaction(Reaction::StarEyes), i64::MAX);

        let mut data = decoded(r#"{"emojis":{"glassesEyes":1e300}}"#);
        assert_eq!(data.add_reaction(Reaction::GlassesEyes), i64::MAX);
    }

    #[test]
    fn test_counters_are_independent() {
        let mut data = decoded(r#"{"emojis":{"starEyes":2,"glassesEyes":7}}"#);
        data.add_reaction(Reaction::GlassesEyes);
        assert_eq!(data.count(Reaction::StarEyes), 2);
        assert_eq!(data.count(Reaction::GlassesEyes), 8);
    }
}
