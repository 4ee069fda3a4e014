// SPDX-License-Identifier: MIT

//! Runtime storage for the application state

use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Mapping from substate name to substate value
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    substates: Arc<RwLock<Map<String, Value>>>,
}

impl StateStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite one substate and return the whole state after the write.
    ///
    /// The write and the snapshot happen under the same guard, so the
    /// returned state always contains this assignment.
    pub async fn assign(&self, name: &str, value: Value) -> Value {
        let mut substates = self.substates.write().await;
        substates.insert(name.to_string(), value);
        Value::Object(substates.clone())
    }

    /// Get a substate value
    pub async fn get(&self, name: &str) -> Option<Value> {
        let substates = self.substates.read().await;
        substates.get(name).cloned()
    }

    /// Whole state as a JSON object
    pub async fn snapshot(&self) -> Value {
        let substates = self.substates.read().await;
        Value::Object(substates.clone())
    }

    /// Get all substate names
    pub async fn keys(&self) -> Vec<String> {
        let substates = self.substates.read().await;
        substates.keys().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.substates.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.substates.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_empty_store() {
        let store = StateStore::new();
        assert!(store.is_empty().await);
        assert!(store.get("anything").await.is_none());
        assert_eq!(store.snapshot().await, json!({}));
    }

    #[tokio::test]
    async fn test_assign_overwrites() {
        let store = StateStore::new();

        store.assign("value", json!("first")).await;
        assert_eq!(store.get("value").await, Some(json!("first")));

        let state = store.assign("value", json!("second")).await;
        assert_eq!(state, json!({"value": "second"}));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_assign_does_not_merge_nested_objects() {
        let store = StateStore::new();
        store.assign("meta", json!({"a": 1})).await;
        store.assign("meta", json!({"b": 2})).await;

        assert_eq!(store.get("meta").await, Some(json!({"b": 2})));
    }

    #[tokio::test]
    async fn test_assign_returns_whole_state() {
        let store = StateStore::new();
        store.assign("a", json!(1)).await;
        let state = store.assign("b", json!("hello")).await;

        assert_eq!(state["a"], 1);
        assert_eq!(state["b"], "hello");
    }

    #[tokio::test]
    async fn test_null_is_a_value() {
        let store = StateStore::new();
        store.assign("cleared", Value::Null).await;

        assert_eq!(store.get("cleared").await, Some(Value::Null));
        assert_eq!(store.keys().await, vec!["cleared".to_string()]);
    }

    #[tokio::test]
    async fn test_store_is_clone() {
        let store = StateStore::new();
        let cloned = store.clone();

        cloned.assign("shared", json!(true)).await;
        assert_eq!(store.get("shared").await, Some(json!(true)));
    }

    #[tokio::test]
    async fn test_independent_stores() {
        let left = StateStore::new();
        let right = StateStore::new();

        left.assign("only_left", json!(1)).await;
        assert!(right.is_empty().await);
    }
}
