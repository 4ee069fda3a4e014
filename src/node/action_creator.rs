// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use super::{Action, Message, Node, NodeError, Outputs};

/// Attach an action to `msg`.
///
/// With an empty `data_source` the action is just `{type}`. Otherwise the
/// named field is copied into the action, and a message lacking that field
/// is rejected with `NodeError::MissingField`.
pub fn build_action(
    mut msg: Message,
    action_type: &str,
    data_source: &str,
) -> Result<Message, NodeError> {
    let action = if data_source.is_empty() {
        Action::new(action_type)
    } else {
        let value = msg
            .field(data_source)
            .ok_or_else(|| NodeError::missing_field(data_source))?;
        Action::with_field(action_type, data_source, value)
    };

    msg.set_action(action);
    Ok(msg)
}

/// Node wrapping a message field into a tagged action
pub struct ActionCreator {
    id: String,
    action_type: String,
    data_source: String,
}

impl ActionCreator {
    pub fn new(id: String, action_type: String, data_source: String) -> Self {
        Self {
            id,
            action_type,
            data_source,
        }
    }

    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    pub fn data_source(&self) -> &str {
        &self.data_source
    }

    pub fn build(&self, msg: Message) -> Result<Message, NodeError> {
        build_action(msg, &self.action_type, &self.data_source)
    }
}

#[async_trait]
impl Node for ActionCreator {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> &'static str {
        "ActionCreator"
    }

    async fn on_input(&self, msg: Message) -> Result<Outputs, NodeError> {
        let msg = self.build(msg)?;
        log::debug!(
            "ActionCreator {} built action {}",
            self.id,
            self.action_type
        );
        Ok(vec![Some(msg)])
    }
}
