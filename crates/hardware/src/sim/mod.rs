//! Simulation utilities and program loading.
//!
//! Provides the program-text loader that turns an input image into
//! instruction records plus its address-layout header.

pub mod loader;

pub use loader::{parse_program, Program, ProgramHeader};
