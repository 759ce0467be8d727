//! Subscriber record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A phone number and whether it currently receives headlines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    #[serde(default)]
    pub phone: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Subscriber {
    /// Create an active subscriber.
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            active: true,
        }
    }

    pub fn inactive(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            active: false,
        }
    }

    /// Read one stored record, tolerating wrong field types.
    ///
    /// A null or missing phone reads as `""`, a non-string phone keeps its
    /// JSON text, and a non-bool `active` reads as `true`. Returns `None`
    /// when the record is not a JSON object.
    pub fn from_record(record: &Value) -> Option<Self> {
        let fields = record.as_object()?;
        let phone = match fields.get("phone") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(phone)) => phone.clone(),
            Some(other) => other.to_string(),
        };
        let active = fields
            .get("active")
            .and_then(Value::as_bool)
            .unwrap_or(true);
        Some(Self { phone, active })
    }
}
