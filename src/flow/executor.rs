// SPDX-License-Identifier: MIT

//! Flow executor

use serde::Serialize;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use uuid::Uuid;

use crate::node::{ErrorSink, FlowError, Message, Node, NodeError};
use crate::state::StateStore;

/// Compiled node ready for execution
pub struct CompiledNode {
    pub node: Arc<dyn Node>,
    /// Target node ids, one list per output port
    pub wires: Vec<Vec<String>>,
}

/// A message that left the flow through an unwired output port
#[derive(Debug, Clone, Serialize)]
pub struct Delivery {
    pub node: String,
    pub port: usize,
    pub message: Message,
}

/// A node invocation that failed and forwarded nothing
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub node: String,
    pub message: String,
    #[serde(skip)]
    pub error: NodeError,
}

impl Failure {
    fn new(node: String, error: NodeError) -> Self {
        Self {
            node,
            message: error.to_string(),
            error,
        }
    }
}

/// Everything that came out of one injection
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dispatch {
    pub msg_id: String,
    pub deliveries: Vec<Delivery>,
    pub failures: Vec<Failure>,
}

impl Dispatch {
    /// Deliveries emitted by one node, in emission order
    pub fn from_node<'a>(&'a self, node: &'a str) -> impl Iterator<Item = &'a Delivery> + 'a {
        self.deliveries.iter().filter(move |d| d.node == node)
    }
}

/// A wired set of nodes sharing one state store
pub struct Flow {
    name: String,
    description: String,
    nodes: HashMap<String, CompiledNode>,
    node_order: Vec<String>,
    store: StateStore,
    sink: Arc<dyn ErrorSink>,
    max_hops: usize,
}

impl Flow {
    pub fn new(
        name: String,
        description: String,
        nodes: Vec<CompiledNode>,
        store: StateStore,
        sink: Arc<dyn ErrorSink>,
        max_hops: usize,
    ) -> Self {
        let node_order: Vec<String> = nodes.iter().map(|n| n.node.id().to_string()).collect();
        let nodes: HashMap<String, CompiledNode> = nodes
            .into_iter()
            .map(|n| (n.node.id().to_string(), n))
            .collect();

        Self {
            name,
            description,
            nodes,
            node_order,
            store,
            sink,
            max_hops,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The application state shared by this flow's reducers
    pub fn state(&self) -> &StateStore {
        &self.store
    }

    /// Nodes in declaration order
    pub fn nodes(&self) -> impl Iterator<Item = &Arc<dyn Node>> {
        self.node_order.iter().filter_map(|id| self.nodes.get(id).map(|n| &n.node))
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.nodes.contains_key(node_id)
    }

    /// Deliver `msg` to `node_id` and follow the wires until every message
    /// has been handled.
    ///
    /// Messages are processed one at a time in FIFO order. A message sent
    /// on a port with several targets is cloned for each of them.
    ///
    /// Past `max_hops` node invocations the whole dispatch is discarded and
    /// `FlowError::HopLimit` returned. State merges done before that point
    /// stay in the store.
    pub async fn inject(&self, node_id: &str, mut msg: Message) -> Result<Dispatch, FlowError> {
        if !self.contains(node_id) {
            return Err(FlowError::UnknownNode(node_id.to_string()));
        }

        let msg_id = match msg.field("_msgid") {
            Some(Value::String(id)) => id,
            Some(other) => other.to_string(),
            None => Uuid::new_v4().to_string(),
        };
        msg.set_field("_msgid", Value::String(msg_id.clone()));
        let mut dispatch = Dispatch {
            msg_id: msg_id.clone(),
            ..Dispatch::default()
        };

        let mut queue = VecDeque::from([(node_id.to_string(), msg)]);
        let mut hops = 0;

        while let Some((id, msg)) = queue.pop_front() {
            hops += 1;
            if hops > self.max_hops {
                log::error!(
                    "Message {} hit the hop limit; dropping {} delivery(ies), {} failure(s) and {} queued message(s)",
                    msg_id,
                    dispatch.deliveries.len(),
                    dispatch.failures.len(),
                    queue.len() + 1
                );
                return Err(FlowError::HopLimit {
                    limit: self.max_hops,
                    msg_id,
                    delivered: dispatch.deliveries.len(),
                    failed: dispatch.failures.len(),
                });
            }

            let compiled = self
                .nodes
                .get(&id)
                .ok_or_else(|| FlowError::UnknownNode(id.clone()))?;

            let outputs = match compiled.node.on_input(msg).await {
                Ok(outputs) => outputs,
                Err(e) => {
                    log::warn!("Node {} dropped message {}: {}", id, msg_id, e);
                    self.sink.report(&id, &e);
                    dispatch.failures.push(Failure::new(id, e));
                    continue;
                }
            };

            for (port, out) in outputs.into_iter().enumerate() {
                let Some(out) = out else { continue };
                let targets = compiled.wires.get(port).map(Vec::as_slice).unwrap_or(&[]);

                if targets.is_empty() {
                    dispatch.deliveries.push(Delivery {
                        node: id.clone(),
                        port,
                        message: out,
                    });
                    continue;
                }

                for target in targets {
                    queue.push_back((target.clone(), out.clone()));
                }
            }
        }

        log::debug!(
            "Message {} finished after {} hop(s) with {} delivery(ies)",
            msg_id,
            hops,
            dispatch.deliveries.len()
        );
        Ok(dispatch)
    }
}
