//! Architectural register state.

/// General-purpose register file and program counter.
pub mod gpr;

pub use gpr::{RegisterFile, RegisterSnapshot};
