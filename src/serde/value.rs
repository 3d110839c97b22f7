//! Runtime values held by record instances
//!
//! `Value` is the typed counterpart of the JSON wire tree: every field of a
//! constructed instance holds exactly one `Value`. Absent optional fields
//! hold `Value::Null`.

use std::hash::{Hash, Hasher};

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use super::schema::Instance;

/// A typed field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Absent optional field, or an explicit wire null
    Null,
    /// UTF-8 string
    Str(String),
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// Parsed timestamp that remembers its wire text
    Timestamp(Timestamp),
    /// Ordered sequence of values
    List(Vec<Value>),
    /// Instance of a nested schema
    Record(Instance),
}

impl Value {
    /// Returns the kind name for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Timestamp(_) => "timestamp",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }

    /// Returns whether this is `Value::Null`
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Emits the JSON wire form of this value.
    ///
    /// Null maps to JSON null, timestamps re-emit their original text,
    /// lists and records recurse.
    pub fn to_wire(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::Number((*i).into()),
            Value::Timestamp(ts) => serde_json::Value::String(ts.as_str().to_string()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_wire).collect())
            }
            Value::Record(instance) => instance.to_json(),
        }
    }

    /// Returns the string contents if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean if this is a bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is an int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the timestamp if this is a timestamp value
    pub fn as_timestamp(&self) -> Option<&Timestamp> {
        match self {
            Value::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    /// Returns the elements if this is a list value
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the nested instance if this is a record value
    pub fn as_record(&self) -> Option<&Instance> {
        match self {
            Value::Record(instance) => Some(instance),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<Timestamp> for Value {
    fn from(ts: Timestamp) -> Self {
        Value::Timestamp(ts)
    }
}

/// Accepted wire patterns, tried in order during decode.
///
/// The first two bind a literal `Z` suffix and are interpreted as UTC; the
/// last two carry a numeric offset (`%z` accepts both `+0000` and `+00:00`
/// punctuation). Servers of different versions emit different combinations
/// of these, so decode is deliberately permissive.
const UTC_PATTERNS: [&str; 2] = ["%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%dT%H:%M:%S%.fZ"];
const OFFSET_PATTERNS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z"];

/// A point in time that remembers the exact wire text it was decoded from.
///
/// Serialization re-emits that text unchanged, so round-tripping never
/// reformats a timestamp the caller did not construct locally. Equality and
/// hashing use the parsed instant only: the same moment written with a `Z`
/// suffix and with a `+0000` offset compares equal.
#[derive(Debug, Clone)]
pub struct Timestamp {
    raw: String,
    instant: DateTime<Utc>,
}

impl Timestamp {
    /// Parses wire text against the accepted pattern list, returning the
    /// first successful interpretation.
    pub fn parse(text: &str) -> Option<Self> {
        for pattern in UTC_PATTERNS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
                return Some(Self {
                    raw: text.to_string(),
                    instant: Utc.from_utc_datetime(&naive),
                });
            }
        }
        for pattern in OFFSET_PATTERNS {
            if let Ok(parsed) = DateTime::parse_from_str(text, pattern) {
                return Some(Self {
                    raw: text.to_string(),
                    instant: parsed.with_timezone(&Utc),
                });
            }
        }
        None
    }

    /// Creates a timestamp from an instant, with canonical `Z`-suffixed text.
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self {
            raw: instant.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            instant,
        }
    }

    /// Returns the wire text this timestamp serializes to
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed instant
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}

impl Eq for Timestamp {}

impl Hash for Timestamp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.instant.hash(state);
    }
}
