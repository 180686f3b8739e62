//! Workspace facade: re-exports `dinedb-core` so the demos can use
//! `dinedb_rs::...` or `dinedb_core::...` interchangeably.

pub use dinedb_core::*;
