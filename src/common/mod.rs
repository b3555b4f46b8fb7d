//! Common types shared across saplingdb.
//!
//! - Configuration (fan-out of a tree)
//! - Error types

pub mod config;
pub mod error;

pub use config::BTreeConfig;
pub use error::{Error, Result};
