//! CLI command implementations

pub mod save;
pub mod status;
pub mod validate;
