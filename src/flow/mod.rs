// SPDX-License-Identifier: MIT

//! Flow runtime
//!
//! Loads flow definitions, wires nodes together and drives messages
//! through them one injection at a time.

pub mod builder;
pub mod config;
pub mod executor;
pub mod loader;
pub mod server;
pub mod types;

pub use builder::Builder;
pub use config::RuntimeConfig;
pub use executor::{Delivery, Dispatch, Failure, Flow};
pub use loader::FlowLoader;
pub use types::{FlowDefinition, NodeDefinition, NodeKind};
