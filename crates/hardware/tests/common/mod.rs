//! Shared test infrastructure.
//!
//! Helpers for assembling small programs and building processors with a
//! deterministic test layout:
//!
//! - instruction window starts at `0x1000`;
//! - the data window starts at the instruction window's upper bound;
//! - 256 bytes of memory and a 4-set direct-mapped cache.

use rv64emu_core::isa::{Instruction, Opcode, Operands};
use rv64emu_core::{Configuration, Exception, NullReporter, Processor};

/// Start of the instruction window in every test program.
pub const INSTR_LOWER: u64 = 0x1000;

/// Data memory size of every test program.
pub const MEMORY_SZ: u64 = 0x100;

/// Builds the standard test configuration for an `count`-instruction program.
pub fn test_config(count: usize) -> Configuration {
    Configuration {
        instr_lower: INSTR_LOWER,
        instr_upper: INSTR_LOWER + 4 * count as u64,
        entry_address: INSTR_LOWER,
        memory_sz: MEMORY_SZ,
        cache_sets: 4,
        cache_total_lines: 4,
        ..Configuration::default()
    }
}

/// Assembles opcode/operand pairs into instruction records at contiguous
/// 4-byte addresses from [`INSTR_LOWER`].
pub fn assemble(ops: &[(Opcode, Operands)]) -> Vec<Instruction> {
    ops.iter()
        .enumerate()
        .map(|(i, (opcode, operands))| {
            Instruction::new(*opcode, INSTR_LOWER + 4 * i as u64, *operands)
        })
        .collect()
}

/// Builds a processor primed with the given program and the standard layout.
///
/// # Panics
///
/// Panics when the standard test configuration is rejected, which would be a
/// bug in the harness itself.
pub fn processor(ops: &[(Opcode, Operands)]) -> Processor {
    let program = assemble(ops);
    let cfg = test_config(program.len());
    match Processor::new(cfg, program) {
        Ok(proc) => proc,
        Err(e) => panic!("test harness configuration rejected: {e}"),
    }
}

/// Steps once, panicking on any exception.
///
/// # Panics
///
/// Panics when the step faults.
pub fn step_ok(proc: &mut Processor) {
    let mut reporter = NullReporter;
    if let Err(e) = proc.step(&mut reporter) {
        panic!("step faulted: {e}");
    }
}

/// Steps once, returning the exception the step must raise.
///
/// # Panics
///
/// Panics when the step retires cleanly.
pub fn step_err(proc: &mut Processor) -> Exception {
    let mut reporter = NullReporter;
    match proc.step(&mut reporter) {
        Ok(()) => panic!("step unexpectedly retired"),
        Err(e) => e,
    }
}
