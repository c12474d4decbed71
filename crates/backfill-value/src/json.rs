//! JSON boundary
//!
//! Converts between `serde_json` documents and [`Value`]. Plain conversion
//! maps every JSON object to a plain mapping; [`JsonClassifier::extended`]
//! additionally recognises tagged objects and classifies them as opaque
//! values, so the plain/opaque decision is made here and nowhere else.

use crate::error::ValueError;
use crate::opaque::{OpaqueValue, PendingValue, Record};
use crate::value::{Mapping, Value};
use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as Json;

/// Tag for date values: `{"$date": "2024-01-01T00:00:00Z"}`
pub const DATE_TAG: &str = "$date";
/// Tag for patterns: `{"$regex": "^a+$"}`
pub const PATTERN_TAG: &str = "$regex";
/// Tag for pending values: `{"$pending": null}` or `{"$pending": <resolved>}`
pub const PENDING_TAG: &str = "$pending";
/// Tag for typed records: `{"$type": "User", ...fields}`
pub const TYPE_TAG: &str = "$type";

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Self::Int(i),
                (None, Some(u)) => Self::UInt(u),
                (None, None) => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Self::String(s),
            Json::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Json::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null | Self::Undefined => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::UInt(u) => serializer.serialize_u64(*u),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::String(s) => serializer.serialize_str(s),
            Self::Sequence(items) => serializer.collect_seq(items),
            Self::Mapping(map) => serializer.collect_map(map),
            Self::Opaque(opaque) => opaque.serialize(serializer),
        }
    }
}

impl Serialize for OpaqueValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Date(date) => {
                serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Self::Pattern(pattern) => serializer.serialize_str(pattern.as_str()),
            Self::Pending(pending) => match pending.get() {
                Some(value) => value.serialize(serializer),
                None => serializer.serialize_unit(),
            },
            Self::Record(record) => serializer.collect_map(record.fields()),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Json::deserialize(deserializer).map(Self::from)
    }
}

impl Value {
    /// Parse JSON text into a value using plain classification
    ///
    /// # Errors
    /// Returns [`ValueError::Json`] if the text is not valid JSON
    pub fn from_json_str(text: &str) -> Result<Self, ValueError> {
        let json: Json = serde_json::from_str(text)?;
        Ok(Self::from(json))
    }
}

/// Classifies JSON objects into plain mappings or opaque values
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonClassifier {
    extended: bool,
}

impl JsonClassifier {
    /// Every object becomes a plain mapping
    #[inline]
    #[must_use]
    pub fn plain() -> Self {
        Self { extended: false }
    }

    /// Tagged objects (`$date`, `$regex`, `$pending`, `$type`) become opaque values
    #[inline]
    #[must_use]
    pub fn extended() -> Self {
        Self { extended: true }
    }

    /// Check whether tagged objects are recognised
    #[inline]
    #[must_use]
    pub fn is_extended(&self) -> bool {
        self.extended
    }

    /// Parse and classify JSON text
    ///
    /// # Errors
    /// Returns error on malformed JSON or malformed tags
    pub fn parse_str(&self, text: &str) -> Result<Value, ValueError> {
        let json: Json = serde_json::from_str(text)?;
        self.classify(json)
    }

    /// Classify a parsed JSON document
    ///
    /// # Errors
    /// Returns error if a tagged object carries an invalid payload
    pub fn classify(&self, json: Json) -> Result<Value, ValueError> {
        if !self.extended {
            return Ok(Value::from(json));
        }

        match json {
            Json::Array(items) => items
                .into_iter()
                .map(|item| self.classify(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Sequence),
            Json::Object(map) => self.classify_object(map),
            scalar => Ok(Value::from(scalar)),
        }
    }

    fn classify_object(&self, mut map: serde_json::Map<String, Json>) -> Result<Value, ValueError> {
        if map.len() == 1 {
            if let Some(payload) = map.remove(DATE_TAG) {
                return parse_date(payload);
            }
            if let Some(payload) = map.remove(PATTERN_TAG) {
                return parse_pattern(payload);
            }
            if let Some(payload) = map.remove(PENDING_TAG) {
                let pending = match payload {
                    Json::Null => PendingValue::new(),
                    resolved => PendingValue::resolved(self.classify(resolved)?),
                };
                return Ok(Value::from(pending));
            }
        }

        if let Some(type_name) = map.shift_remove(TYPE_TAG) {
            let Json::String(type_name) = type_name else {
                return Err(ValueError::invalid_tag(TYPE_TAG, "expected a string type name"));
            };
            let fields = self.classify_fields(map)?;
            return Ok(Value::from(Record::new(type_name, fields)));
        }

        self.classify_fields(map).map(Value::Mapping)
    }

    fn classify_fields(&self, map: serde_json::Map<String, Json>) -> Result<Mapping, ValueError> {
        map.into_iter()
            .map(|(key, value)| self.classify(value).map(|value| (key, value)))
            .collect()
    }
}

fn parse_date(payload: Json) -> Result<Value, ValueError> {
    let Json::String(input) = payload else {
        return Err(ValueError::invalid_tag(DATE_TAG, "expected an RFC 3339 string"));
    };
    let date = DateTime::parse_from_rfc3339(&input)
        .map_err(|source| ValueError::InvalidDate {
            input: input.clone(),
            source,
        })?
        .with_timezone(&Utc);
    Ok(Value::opaque(OpaqueValue::Date(date)))
}

fn parse_pattern(payload: Json) -> Result<Value, ValueError> {
    let Json::String(input) = payload else {
        return Err(ValueError::invalid_tag(PATTERN_TAG, "expected a pattern string"));
    };
    let pattern = Regex::new(&input).map_err(|source| ValueError::InvalidPattern {
        input: input.clone(),
        source,
    })?;
    Ok(Value::opaque(OpaqueValue::Pattern(pattern)))
}
