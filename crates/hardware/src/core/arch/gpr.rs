//! General-Purpose Register File.
//!
//! This module implements the architectural register state of the emulated
//! machine. It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`) and the program counter.
//! 2. **Invariant Enforcement:** Ensures that register `x0` is hardwired to zero.
//! 3. **Observability:** Provides immutable snapshots for the reporting boundary.
//!
//! The zero-register rule is a guard at the mutation boundary, not a special
//! storage cell. Out-of-range indices are treated leniently: reads return 0
//! and writes are ignored, keeping single-field access inert rather than
//! turning a caller contract violation into a hard failure.

use serde::Serialize;

use crate::isa::abi::REG_COUNT;

/// Architectural register file.
///
/// Contains 32 general-purpose registers plus the program counter. Register
/// `x0` always reads as zero and silently discards writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u64; REG_COUNT],
    pc: u64,
}

/// Immutable copy of the full register state, taken for observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegisterSnapshot {
    /// Program counter at snapshot time.
    pub pc: u64,
    /// All 32 general-purpose registers, `x0` first.
    pub regs: [u64; REG_COUNT],
}

impl RegisterFile {
    /// Creates a register file with all registers zeroed and the program
    /// counter at `entry_pc`.
    pub const fn new(entry_pc: u64) -> Self {
        Self {
            regs: [0; REG_COUNT],
            pc: entry_pc,
        }
    }

    /// Reads a general-purpose register.
    ///
    /// `x0` always reads 0; indices above 31 also read 0.
    pub const fn read(&self, idx: u8) -> u64 {
        if idx == 0 || idx as usize >= REG_COUNT {
            0
        } else {
            self.regs[idx as usize]
        }
    }

    /// Writes a general-purpose register.
    ///
    /// Writes to `x0` and to indices above 31 are silently ignored.
    pub fn write(&mut self, idx: u8, val: u64) {
        if idx != 0 && (idx as usize) < REG_COUNT {
            self.regs[idx as usize] = val;
        }
    }

    /// Current program counter.
    pub const fn pc(&self) -> u64 {
        self.pc
    }

    /// Sets the program counter.
    pub fn set_pc(&mut self, pc: u64) {
        self.pc = pc;
    }

    /// Takes an immutable snapshot of the full register state.
    pub const fn snapshot(&self) -> RegisterSnapshot {
        RegisterSnapshot {
            pc: self.pc,
            regs: self.regs,
        }
    }
}
