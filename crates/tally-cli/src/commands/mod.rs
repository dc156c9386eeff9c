//! CLI command implementations.

pub mod inspect;
pub mod run;
pub mod validate;
