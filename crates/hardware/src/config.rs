//! Run configuration.
//!
//! This module defines the configuration block consumed by the processor. It holds:
//! 1. **Address layout:** Instruction window bounds, entry point, and data memory size.
//! 2. **Cache geometry:** Set and total line counts for the direct-mapped cache.
//! 3. **Presentation flags:** Trace toggles the core carries but never interprets;
//!    reporters apply them at the observation boundary.

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;
use crate::sim::loader::ProgramHeader;

/// Emulation run parameters.
///
/// The address fields mirror the program-image header; the flags and cache
/// geometry come from the front end. The valid data-address range is
/// `[instr_upper, instr_upper + memory_sz)` — the data region is based at the
/// instruction region's upper bound, with no separately configured data base.
/// That conflation is part of the program-image contract and is kept for
/// compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Lowest instruction address.
    pub instr_lower: u64,
    /// One past the highest instruction address; also the base of the data region.
    pub instr_upper: u64,
    /// Address of the first instruction to execute.
    pub entry_address: u64,
    /// Size of data memory in bytes, all initially zero.
    pub memory_sz: u64,

    /// Emit a trace event for each fetched instruction.
    pub print_instrs: bool,
    /// Emit register-delta and register-dump trace events.
    pub print_regs: bool,
    /// Emit the cache report at halt.
    pub print_cache: bool,

    /// Number of cache sets.
    pub cache_sets: u64,
    /// Total number of cache lines; must equal `cache_sets`.
    pub cache_total_lines: u64,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            instr_lower: 0,
            instr_upper: 0,
            entry_address: 0,
            memory_sz: 0,
            print_instrs: true,
            print_regs: true,
            print_cache: true,
            cache_sets: 1,
            cache_total_lines: 1,
        }
    }
}

impl Configuration {
    /// Builds a configuration from a parsed program header, with default
    /// presentation flags and a single-line cache.
    pub fn for_program(header: &ProgramHeader) -> Self {
        Self {
            instr_lower: header.instr_lower,
            instr_upper: header.instr_upper,
            entry_address: header.entry_address,
            memory_sz: header.memory_sz,
            ..Self::default()
        }
    }

    /// Validates the cache geometry.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the set count is zero or the total line
    /// count differs from the set count.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_sets == 0 {
            return Err(ConfigError::EmptyCache);
        }
        if self.cache_total_lines != self.cache_sets {
            return Err(ConfigError::CacheGeometry {
                lines: self.cache_total_lines,
                sets: self.cache_sets,
            });
        }
        Ok(())
    }
}
