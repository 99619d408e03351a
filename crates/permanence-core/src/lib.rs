//! permanence-core
//!
//! Pure domain types for patient form tracking: the form document wire model,
//! rule payload shapes, the user config object, and file naming conventions.
//! No filesystem access lives here.

pub mod error;
pub mod models;
pub mod paths;
