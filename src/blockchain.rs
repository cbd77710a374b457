// Thin re-export module: implementation is in `blockchain/core.rs` to allow
// progressive decomposition of blockchain responsibilities (chain management,
// balance queries, validation).

pub mod core;
pub use core::*;
