//! Workspace state: the single source of truth for the open task.
//!
//! - `types`: the state aggregate and its limits
//! - `store`: the action union and the total transition function

mod store;
mod types;

pub use store::*;
pub use types::*;
