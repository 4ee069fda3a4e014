// SPDX-License-Identifier: MIT

//! Flow builder - turns flow definitions into runnable flows
//!
//! Validation happens here so that a built `Flow` only ever routes to
//! nodes and ports that exist.

use std::collections::HashSet;
use std::sync::Arc;

use crate::flow::config::DEFAULT_MAX_HOPS;
use crate::flow::executor::{CompiledNode, Flow};
use crate::flow::loader::FlowLoader;
use crate::flow::types::{FlowDefinition, NodeDefinition, NodeKind};
use crate::node::error::{FlowError, RuntimeError};
use crate::node::{ActionCreator, ErrorSink, LogSink, Node, RootReducer};
use crate::state::StateStore;

/// High-level builder for constructing flows from YAML definitions
pub struct Builder {
    loader: FlowLoader,
    store: StateStore,
    sink: Arc<dyn ErrorSink>,
    max_hops: usize,
}

impl Builder {
    pub fn new(store: StateStore, sink: Arc<dyn ErrorSink>) -> Self {
        Self {
            loader: FlowLoader::new(),
            store,
            sink,
            max_hops: DEFAULT_MAX_HOPS,
        }
    }

    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    /// Build a flow from a YAML file path
    pub fn build_flow(&self, file_path: &str) -> Result<Flow, RuntimeError> {
        let def = self.loader.load_flow(file_path)?;
        Ok(self.build_from_def(&def)?)
    }

    /// Build a flow from a parsed definition
    pub fn build_from_def(&self, def: &FlowDefinition) -> Result<Flow, FlowError> {
        let mut ids = HashSet::new();
        for node in &def.nodes {
            if !ids.insert(node.id.as_str()) {
                return Err(FlowError::DuplicateNode(node.id.clone()));
            }
        }

        let mut compiled = Vec::with_capacity(def.nodes.len());
        for node_def in &def.nodes {
            let node = self.compile_node(node_def)?;
            Self::check_wires(node_def, node.outputs(), &ids)?;
            compiled.push(CompiledNode {
                node,
                wires: node_def.wires.clone(),
            });
        }

        log::info!(
            "Built flow '{}' with {} node(s)",
            def.name,
            compiled.len()
        );

        Ok(Flow::new(
            def.name.clone(),
            def.description.clone(),
            compiled,
            self.store.clone(),
            self.sink.clone(),
            self.max_hops,
        ))
    }

    fn compile_node(&self, def: &NodeDefinition) -> Result<Arc<dyn Node>, FlowError> {
        match &def.kind {
            NodeKind::ActionCreator {
                action_type,
                data_source,
            } => {
                if action_type.is_empty() {
                    return Err(FlowError::EmptyActionType(def.id.clone()));
                }
                Ok(Arc::new(ActionCreator::new(
                    def.id.clone(),
                    action_type.clone(),
                    data_source.clone(),
                )))
            }
            NodeKind::RootReducer => Ok(Arc::new(RootReducer::new(
                def.id.clone(),
                self.store.clone(),
            ))),
        }
    }

    fn check_wires(
        def: &NodeDefinition,
        outputs: usize,
        ids: &HashSet<&str>,
    ) -> Result<(), FlowError> {
        for (port, targets) in def.wires.iter().enumerate() {
            if targets.is_empty() {
                continue;
            }
            if port >= outputs {
                return Err(FlowError::PortOutOfRange {
                    node: def.id.clone(),
                    port,
                    outputs,
                });
            }
            if let Some(to) = targets.iter().find(|t| !ids.contains(t.as_str())) {
                return Err(FlowError::UnknownTarget {
                    from: def.id.clone(),
                    to: to.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new(StateStore::new(), Arc::new(LogSink))
    }
}
