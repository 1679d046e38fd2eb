//! Exception and error definitions.
//!
//! This module defines the failure vocabulary of the emulator:
//! 1. **Exceptions:** Per-step outcomes that terminate a run (including a clean exit).
//! 2. **Configuration errors:** Invalid machine geometry, rejected at construction.
//! 3. **Parse errors:** Malformed program text, rejected by the loader.
//!
//! Exceptions are terminal: there is no retry or partial recovery, any fault
//! unwinds to the run loop which reports final state and stops.

use thiserror::Error;

/// Terminal outcome of an emulation run.
///
/// Raised by the execution engine when an invariant is violated or a deliberate
/// halt is requested. `Exit` is the normal, successful termination; every other
/// variant is a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Exception {
    /// The program counter left the instruction address window, or an
    /// instruction was claimed by no execution handler.
    #[error("instruction fault")]
    InstructionFault,

    /// A data access fell outside the data address window, or the address
    /// arithmetic for the bounds check overflowed.
    #[error("memory fault")]
    MemoryFault,

    /// The program requested termination via the exit system call.
    #[error("process exit")]
    Exit,

    /// The system-call number register held a value outside the recognized set.
    #[error("unknown syscall")]
    UnknownSyscall,
}

impl Exception {
    /// Whether this outcome is a fault rather than a clean exit.
    pub const fn is_fault(self) -> bool {
        !matches!(self, Self::Exit)
    }
}

/// Invalid machine geometry, detected at construction time.
///
/// Configuration errors never enter the run loop; they are reported to the
/// caller before a processor is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A direct-mapped cache holds exactly one line per set.
    #[error("direct-mapped cache requires one line per set: {lines} lines for {sets} sets")]
    CacheGeometry {
        /// Requested total line count.
        lines: u64,
        /// Requested set count.
        sets: u64,
    },

    /// The cache must hold at least one set.
    #[error("cache must have at least one set")]
    EmptyCache,
}

/// Malformed program text, reported by the loader with the offending line.
///
/// Line numbers are 1-based; line 1 is the address header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The program text contained no lines at all.
    #[error("program is empty")]
    EmptyProgram,

    /// The header line did not hold four hexadecimal address fields.
    #[error("line 1: malformed header: '{text}'")]
    BadHeader {
        /// The header line as read.
        text: String,
    },

    /// An instruction line began with an unrecognized mnemonic.
    #[error("line {line}: unknown instruction '{mnemonic}'")]
    UnknownMnemonic {
        /// 1-based source line.
        line: usize,
        /// The mnemonic as read.
        mnemonic: String,
    },

    /// An instruction line did not match its opcode's operand format.
    #[error("line {line}: malformed operands for '{mnemonic}': '{text}'")]
    BadOperands {
        /// 1-based source line.
        line: usize,
        /// The offending mnemonic.
        mnemonic: String,
        /// The operand text as read.
        text: String,
    },

    /// A register operand was outside `x0`..`x31`.
    #[error("line {line}: register index out of range: x{index}")]
    BadRegister {
        /// 1-based source line.
        line: usize,
        /// The register index as read.
        index: u64,
    },
}
