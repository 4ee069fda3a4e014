// SPDX-License-Identifier: MIT

//! Node module - the message-handler side of a flow
//!
//! This module provides the core `Node` trait and its implementations:
//! - `ActionCreator` - wraps a message field into a tagged action
//! - `RootReducer` - folds substates into the shared application state

pub mod action;
mod action_creator;
pub mod error;
pub mod message;
mod root_reducer;
pub mod sink;

pub use action::Action;
pub use action_creator::{build_action, ActionCreator};
pub use error::{FlowError, NodeError, RuntimeError};
pub use message::Message;
pub use root_reducer::{RootReducer, STATE_TOPIC};
pub use sink::{ErrorSink, LogSink, MemorySink};

use async_trait::async_trait;

/// Messages emitted by one invocation, indexed by output port.
///
/// `None` leaves a port silent for this invocation.
pub type Outputs = Vec<Option<Message>>;

/// Core node trait for all node types
#[async_trait]
pub trait Node: Send + Sync {
    /// Returns the node id, unique within a flow
    fn id(&self) -> &str;

    /// Returns the node type name as it appears in flow files
    fn kind(&self) -> &'static str;

    /// Number of output ports
    fn outputs(&self) -> usize {
        1
    }

    /// Handle one inbound message.
    ///
    /// An error means nothing is forwarded for this message; the runtime
    /// reports it and the node stays usable.
    async fn on_input(&self, msg: Message) -> Result<Outputs, NodeError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// A node that tags every message with its id (used in tests)
    pub struct TagNode {
        id: String,
    }

    #[async_trait]
    impl Node for TagNode {
        fn id(&self) -> &str {
            &self.id
        }

        fn kind(&self) -> &'static str {
            "Tag"
        }

        async fn on_input(&self, msg: Message) -> Result<Outputs, NodeError> {
            Ok(vec![Some(msg.with_field("tag", json!(self.id)))])
        }
    }

    #[tokio::test]
    async fn test_default_single_output() {
        let node = TagNode {
            id: "tagger".to_string(),
        };
        assert_eq!(node.outputs(), 1);

        let out = node.on_input(Message::new()).await.unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(
            out[0].as_ref().and_then(|m| m.field("tag")),
            Some(json!("tagger"))
        );
    }
}
