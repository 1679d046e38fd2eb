//! ABI constants for the emulated machine.
//!
//! Register-convention and system-call numbers referenced by the execution
//! engine.

/// Index of the hard-wired zero register (`x0`).
pub const REG_ZERO: u8 = 0;

/// Register holding the system-call number (`x17` / `a7`).
pub const REG_SYSCALL: u8 = 17;

/// Number of architectural general-purpose registers.
pub const REG_COUNT: usize = 32;

/// System-call number requesting a clean process exit.
pub const SYSCALL_EXIT: u64 = 2;

/// System-call number requesting a full register dump; execution continues.
pub const SYSCALL_DUMP_REGS: u64 = 23;

/// Size of every instruction in bytes.
pub const INSTRUCTION_BYTES: u64 = 4;
