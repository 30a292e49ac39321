//! Various utilities

pub mod env_var;
pub mod logging;
