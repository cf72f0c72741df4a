//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains some of:
//! - `mod.rs` — Rich domain types and local validation
//! - `wire.rs` — Raw serde structs matching backend responses
//! - `convert.rs` — `TryFrom`/`From` conversions with validation
//! - `state.rs` — State containers and workflow state machines
//! - `client.rs` — Sub-client driving the state against `OrdersApi`

pub mod create;
pub mod import;
pub mod order;
pub mod selection;
