// SPDX-License-Identifier: MIT

//! Redux-style state container built from two flow nodes.
//!
//! `ActionCreator` wraps a message field into a tagged action and
//! `RootReducer` folds named substates into a shared application state,
//! emitting the full state and the changed substate.

pub mod flow;
pub mod node;
pub mod state;
