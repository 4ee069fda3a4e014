// SPDX-License-Identifier: MIT

//! YAML schema types for flow definitions

use serde::{Deserialize, Serialize};

/// Top-level flow definition
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct FlowDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Nodes in the flow
    #[serde(default)]
    pub nodes: Vec<NodeDefinition>,
}

/// A node in the flow
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeDefinition {
    /// Unique identifier for this node
    pub id: String,
    /// Node type and its configuration
    #[serde(flatten)]
    pub kind: NodeKind,
    /// Target node ids, one list per output port
    #[serde(default)]
    pub wires: Vec<Vec<String>>,
}

/// Node type, selected by the `type` key
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type")]
pub enum NodeKind {
    ActionCreator {
        #[serde(alias = "actionType")]
        action_type: String,
        /// Empty means the action carries no data field
        #[serde(default, alias = "dataSource")]
        data_source: String,
    },
    RootReducer,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::ActionCreator { .. } => "ActionCreator",
            NodeKind::RootReducer => "RootReducer",
        }
    }
}
