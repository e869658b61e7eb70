//! Task module: the import-task wire model shared by every other module.
//!
//! Types live in `task::model`; they are deserialized from the import
//! server's JSON and never mutated on the client.

mod model;

pub use model::*;
