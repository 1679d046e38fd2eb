//! Common types shared across the emulator.
//!
//! This module provides the building blocks used by every other component:
//! 1. **Exceptions:** Terminal run outcomes surfaced by the execution engine.
//! 2. **Errors:** Configuration and program-text failures reported before a run starts.

/// Exception and error definitions.
pub mod error;

pub use error::{ConfigError, Exception, ParseError};
