// SPDX-License-Identifier: MIT

//! Flow loader - YAML file loading and parsing

use super::types::FlowDefinition;
use crate::node::error::{FlowError, RuntimeError};
use std::fs;
use std::path::Path;

/// Loads flow definitions from YAML files
pub struct FlowLoader;

impl FlowLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a flow definition from a YAML file
    pub fn load_flow<P: AsRef<Path>>(&self, path: P) -> Result<FlowDefinition, RuntimeError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FlowError::FileNotFound(path.display().to_string()).into());
        }
        let content = fs::read_to_string(path)?;
        Self::parse_yaml(&content)
    }

    /// Parse a flow definition from a YAML string
    pub fn parse_yaml(content: &str) -> Result<FlowDefinition, RuntimeError> {
        let def: FlowDefinition = serde_yaml::from_str(content)?;
        Ok(def)
    }
}

impl Default for FlowLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::types::NodeKind;

    #[test]
    fn test_parse_counter_flow() {
        let yaml = r#"
name: counter
description: "Counts button presses"

nodes:
  - id: increment
    type: ActionCreator
    action_type: INCREMENT
    wires: [[reducer]]
  - id: reducer
    type: RootReducer
"#;
        let def = FlowLoader::parse_yaml(yaml).unwrap();
        assert_eq!(def.name, "counter");
        assert_eq!(def.description, "Counts button presses");
        assert_eq!(def.nodes.len(), 2);
        assert_eq!(def.nodes[1].kind, NodeKind::RootReducer);
    }

    #[test]
    fn test_parse_minimal_flow() {
        let def = FlowLoader::parse_yaml("name: empty").unwrap();
        assert!(def.nodes.is_empty());
        assert!(def.description.is_empty());
    }

    #[test]
    fn test_invalid_yaml_returns_error() {
        let yaml = r#"
name:
  - invalid structure
"#;
        let result = FlowLoader::parse_yaml(yaml);
        assert!(matches!(result, Err(RuntimeError::Yaml(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = FlowLoader::new().load_flow("does/not/exist.yaml");
        assert!(matches!(
            result,
            Err(RuntimeError::Flow(FlowError::FileNotFound(_)))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("redux-nodes-{}.yaml", std::process::id()));
        fs::write(&path, "name: from-disk\nnodes: []\n").unwrap();

        let def = FlowLoader::new().load_flow(&path).unwrap();
        assert_eq!(def.name, "from-disk");

        fs::remove_file(&path).unwrap();
    }
}
