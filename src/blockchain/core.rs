// core.rs splits responsibilities into submodules for easier maintenance:
// chain management in `chain`, balance queries in `state`, full-chain
// validation in `validation`.
pub mod chain;
pub mod state;
pub mod validation;

pub use chain::*;
