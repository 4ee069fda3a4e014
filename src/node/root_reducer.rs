// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;

use super::{Message, Node, NodeError, Outputs};
use crate::state::StateStore;

/// Topic of the full-state message
pub const STATE_TOPIC: &str = "/state";

/// Node folding substates into the application state.
///
/// Port 0 carries the full state, port 1 the substate that just changed.
pub struct RootReducer {
    id: String,
    store: StateStore,
}

impl RootReducer {
    pub fn new(id: String, store: StateStore) -> Self {
        Self { id, store }
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Merge `msg.substate` under `msg.substateName`.
    ///
    /// Returns `(full_state, delta)`. Only absence of either field is an
    /// error; null, zero and empty values are stored as given. A non-string
    /// `substateName` is keyed by its JSON text, so `null` becomes `"null"`.
    pub async fn merge(&self, msg: Message) -> Result<(Message, Message), NodeError> {
        let (name, substate) = match (msg.field("substateName"), msg.field("substate")) {
            (Some(Value::String(name)), Some(substate)) => (name, substate),
            (Some(name), Some(substate)) => (name.to_string(), substate),
            _ => return Err(NodeError::InvalidReducerInput),
        };

        let state = self.store.assign(&name, substate.clone()).await;

        let mut delta = Message::new();
        delta.set_field(&name, substate);
        delta.set_field("topic", format!("state/{}", name).into());

        let full = Message {
            state: Some(state),
            topic: Some(STATE_TOPIC.to_string()),
            ..Message::default()
        };

        log::debug!("RootReducer {} merged substate '{}'", self.id, name);
        Ok((full, delta))
    }
}

#[async_trait]
impl Node for RootReducer {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> &'static str {
        "RootReducer"
    }

    fn outputs(&self) -> usize {
        2
    }

    async fn on_input(&self, msg: Message) -> Result<Outputs, NodeError> {
        let (full, delta) = self.merge(msg).await?;
        Ok(vec![Some(full), Some(delta)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reducer() -> RootReducer {
        RootReducer::new("root".to_string(), StateStore::new())
    }

    #[tokio::test]
    async fn test_first_merge_emits_state_and_delta() {
        let node = reducer();
        let (full, delta) = node
            .merge(Message::substate("counter", json!(1)))
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&full).unwrap(),
            json!({"state": {"counter": 1}, "topic": "/state"})
        );
        assert_eq!(
            serde_json::to_value(&delta).unwrap(),
            json!({"counter": 1, "topic": "state/counter"})
        );
    }

    #[tokio::test]
    async fn test_same_key_overwrites() {
        let node = reducer();
        node.merge(Message::substate("k", json!("v1"))).await.unwrap();
        node.merge(Message::substate("k", json!("v2"))).await.unwrap();

        assert_eq!(node.store().snapshot().await, json!({"k": "v2"}));
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let forward = reducer();
        forward.merge(Message::substate("k1", json!(1))).await.unwrap();
        forward.merge(Message::substate("k2", json!(2))).await.unwrap();

        let backward = reducer();
        backward.merge(Message::substate("k2", json!(2))).await.unwrap();
        backward.merge(Message::substate("k1", json!(1))).await.unwrap();

        assert_eq!(forward.store().snapshot().await, json!({"k1": 1, "k2": 2}));
        assert_eq!(
            forward.store().snapshot().await,
            backward.store().snapshot().await
        );
    }

    #[tokio::test]
    async fn test_missing_substate_is_rejected() {
        let node = reducer();
        node.merge(Message::substate("kept", json!(true))).await.unwrap();

        let mut msg = Message::new();
        msg.substate_name = Some("other".to_string());
        let result = node.merge(msg).await;

        assert_eq!(result.unwrap_err(), NodeError::InvalidReducerInput);
        assert_eq!(node.store().snapshot().await, json!({"kept": true}));
    }

    #[tokio::test]
    async fn test_missing_substate_name_is_rejected() {
        let node = reducer();
        let msg = Message::new().with_field("substate", json!({"a": 1}));

        assert!(node.on_input(msg).await.is_err());
        assert!(node.store().is_empty().await);
    }

    #[tokio::test]
    async fn test_non_string_substate_name_is_merged() {
        let node = reducer();
        let msg: Message =
            serde_json::from_value(json!({"substateName": null, "substate": 1})).unwrap();
        let (_, delta) = node.merge(msg).await.unwrap();

        assert_eq!(delta.topic.as_deref(), Some("state/null"));
        assert_eq!(delta.field("null"), Some(json!(1)));

        let msg: Message =
            serde_json::from_value(json!({"substateName": 5, "substate": "five"})).unwrap();
        node.merge(msg).await.unwrap();

        assert_eq!(
            node.store().snapshot().await,
            json!({"null": 1, "5": "five"})
        );
    }

    #[tokio::test]
    async fn test_falsy_substates_are_stored() {
        let node = reducer();
        for (name, value) in [
            ("null", Value::Null),
            ("zero", json!(0)),
            ("no", json!(false)),
            ("empty", json!("")),
        ] {
            node.merge(Message::substate(name, value)).await.unwrap();
        }

        assert_eq!(
            node.store().snapshot().await,
            json!({"null": null, "zero": 0, "no": false, "empty": ""})
        );
    }

    #[tokio::test]
    async fn test_full_state_contains_earlier_substates() {
        let node = reducer();
        node.merge(Message::substate("a", json!(1))).await.unwrap();
        let (full, delta) = node.merge(Message::substate("b", json!(2))).await.unwrap();

        assert_eq!(full.state, Some(json!({"a": 1, "b": 2})));
        assert_eq!(delta.field("b"), Some(json!(2)));
        assert_eq!(delta.field("a"), None);
    }

    #[tokio::test]
    async fn test_on_input_orders_full_state_first() {
        let node = reducer();
        let out = node
            .on_input(Message::substate("todos", json!([])))
            .await
            .unwrap();

        assert_eq!(node.outputs(), 2);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].as_ref().unwrap().topic.as_deref(), Some("/state"));
        assert_eq!(
            out[1].as_ref().unwrap().topic.as_deref(),
            Some("state/todos")
        );
    }

    #[tokio::test]
    async fn test_reducers_sharing_a_store() {
        let store = StateStore::new();
        let first = RootReducer::new("first".to_string(), store.clone());
        let second = RootReducer::new("second".to_string(), store.clone());

        first.merge(Message::substate("a", json!(1))).await.unwrap();
        let (full, _) = second.merge(Message::substate("b", json!(2))).await.unwrap();

        assert_eq!(full.state, Some(json!({"a": 1, "b": 2})));
    }
}
