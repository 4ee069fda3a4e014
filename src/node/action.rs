// SPDX-License-Identifier: MIT

//! Tagged action records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A tagged record describing an intended state change.
///
/// Serializes as `{"type": ..., [field]: value}`. Actions built through
/// [`Action::new`] and [`Action::with_field`] carry at most one data field;
/// actions deserialized from inbound messages keep whatever extra fields
/// they arrived with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    action_type: String,
    #[serde(flatten)]
    data: Map<String, Value>,
}

impl Action {
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            data: Map::new(),
        }
    }

    /// Action carrying one data field copied from a message.
    ///
    /// A field named `type` replaces the action type itself.
    pub fn with_field(action_type: impl Into<String>, field: &str, value: Value) -> Self {
        if field == "type" {
            let action_type = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            return Self::new(action_type);
        }

        let mut data = Map::new();
        data.insert(field.to_string(), value);
        Self {
            action_type: action_type.into(),
            data,
        }
    }

    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }
}
