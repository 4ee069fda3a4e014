// SPDX-License-Identifier: MIT

//! Application state shared by the reducer nodes of a flow
//!
//! `StateStore` is a cloneable handle; clones observe and mutate the same
//! mapping from substate name to substate value.

mod store;

pub use store::StateStore;
