// SPDX-License-Identifier: MIT

//! The message envelope passed between nodes

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::action::Action;

/// Message flowing along the wires of a flow.
///
/// Fields the nodes care about are typed; everything else lands in
/// `fields`. A name lives in exactly one place: a value that does not fit
/// its typed slot (a numeric `topic`, a string `action`, an explicit
/// `null`) is kept in `fields` instead. `None` in a typed slot therefore
/// does not mean absent; use [`Message::field`] for presence checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct Message {
    #[serde(rename = "_msgid", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "substateName", skip_serializing_if = "Option::is_none")]
    pub substate_name: Option<String>,

    /// `Some(Value::Null)` when set to `null`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substate: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Value>,

    /// Any other field, e.g. `payload`
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl From<Map<String, Value>> for Message {
    fn from(map: Map<String, Value>) -> Self {
        let mut msg = Message::default();
        for (name, value) in map {
            msg.set_field(&name, value);
        }
        msg
    }
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    /// Message as produced by a reducer-shaped node
    pub fn substate(name: impl Into<String>, value: Value) -> Self {
        Self {
            substate_name: Some(name.into()),
            substate: Some(value),
            ..Self::default()
        }
    }

    /// Builder-style variant of [`Message::set_field`]
    pub fn with_field(mut self, name: &str, value: Value) -> Self {
        self.set_field(name, value);
        self
    }

    /// Look up a field by its wire name.
    ///
    /// Returns `None` only when the field is absent; a field explicitly set
    /// to `null` comes back as `Some(Value::Null)`.
    pub fn field(&self, name: &str) -> Option<Value> {
        let typed = match name {
            "_msgid" => self.id.clone().map(Value::String),
            "substateName" => self.substate_name.clone().map(Value::String),
            "substate" => self.substate.clone(),
            "action" => self
                .action
                .as_ref()
                .and_then(|a| serde_json::to_value(a).ok()),
            "topic" => self.topic.clone().map(Value::String),
            "state" => self.state.clone(),
            _ => None,
        };
        typed.or_else(|| self.fields.get(name).cloned())
    }

    /// Set a field by its wire name.
    ///
    /// Values that do not fit a typed slot (a numeric `topic`, a null
    /// `substateName`) are kept in `fields` under the same name and the
    /// typed slot is cleared.
    pub fn set_field(&mut self, name: &str, value: Value) {
        let rest = match (name, value) {
            ("_msgid", Value::String(s)) => {
                self.id = Some(s);
                None
            }
            ("substateName", Value::String(s)) => {
                self.substate_name = Some(s);
                None
            }
            ("substate", v) => {
                self.substate = Some(v);
                None
            }
            ("topic", Value::String(s)) => {
                self.topic = Some(s);
                None
            }
            ("state", v) => {
                self.state = Some(v);
                None
            }
            ("action", v @ Value::Object(_)) => {
                match serde_json::from_value::<Action>(v.clone()) {
                    Ok(action) => {
                        self.action = Some(action);
                        None
                    }
                    Err(_) => Some(v),
                }
            }
            (_, v) => Some(v),
        };

        match rest {
            None => {
                self.fields.remove(name);
            }
            Some(v) => {
                self.clear_typed(name);
                self.fields.insert(name.to_string(), v);
            }
        }
    }

    /// Attach an action, replacing whatever `action` field was there
    pub fn set_action(&mut self, action: Action) {
        self.fields.remove("action");
        self.action = Some(action);
    }

    fn clear_typed(&mut self, name: &str) {
        match name {
            "_msgid" => self.id = None,
            "substateName" => self.substate_name = None,
            "action" => self.action = None,
            "topic" => self.topic = None,
            _ => {}
        }
    }
}
