//! Load and store operations.
//!
//! The effective address is the base-register value plus the signed offset.
//! Valid data addresses lie in `[instr_upper, instr_upper + memory_sz)`; both
//! bound sums use overflow-safe addition, and an overflow in either is itself
//! a memory fault. The cache simulator observes every load/store that passes
//! the bounds check — including loads into `x0`, whose value is discarded but
//! whose access still counts. Signed loads sign-extend into the 64-bit
//! register; unsigned loads and the doubleword load do not; stores truncate
//! the source register to the access width. The program counter advances by 4
//! after any memory operation.

use tracing::trace;

use super::{Outcome, Processor};
use crate::common::error::Exception;
use crate::isa::abi::INSTRUCTION_BYTES;
use crate::isa::{Instruction, Opcode, Operands};

/// Direction and extension rule of one memory operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemOp {
    Store,
    Load { signed: bool },
}

/// Sign-extends the low `width` bytes of `value` into 64 bits.
const fn sign_extend(value: u64, width: u64) -> u64 {
    let shift = 64 - 8 * width;
    (((value << shift) as i64) >> shift) as u64
}

impl Processor {
    /// Executes the instruction if it is a load or store; otherwise makes no
    /// state change.
    pub(super) fn exec_mem_ops(&mut self, inst: &Instruction) -> Result<Outcome, Exception> {
        let (width, op) = match inst.opcode {
            Opcode::Sb => (1, MemOp::Store),
            Opcode::Sh => (2, MemOp::Store),
            Opcode::Sw => (4, MemOp::Store),
            Opcode::Sd => (8, MemOp::Store),
            Opcode::Lb => (1, MemOp::Load { signed: true }),
            Opcode::Lh => (2, MemOp::Load { signed: true }),
            Opcode::Lw => (4, MemOp::Load { signed: true }),
            Opcode::Lbu => (1, MemOp::Load { signed: false }),
            Opcode::Lhu => (2, MemOp::Load { signed: false }),
            Opcode::Lwu => (4, MemOp::Load { signed: false }),
            Opcode::Ld => (8, MemOp::Load { signed: false }),
            _ => return Ok(Outcome::NotClaimed),
        };

        let Operands::RegOffset { reg, base, offset } = inst.operands else {
            return Err(Exception::InstructionFault);
        };

        let effective = self.regs.read(base).wrapping_add(offset as u64);

        // Overflow in either bound sum is itself a fault.
        let window_end = self
            .cfg
            .instr_upper
            .checked_add(self.cfg.memory_sz)
            .ok_or(Exception::MemoryFault)?;
        let access_end = effective
            .checked_add(width)
            .ok_or(Exception::MemoryFault)?;
        if effective < self.cfg.instr_upper || access_end > window_end {
            return Err(Exception::MemoryFault);
        }

        // Every load/store drives the cache, hit or miss.
        let hit = self.cache.access(effective);
        trace!(addr = format_args!("{effective:#x}"), hit, "data access");

        // The data region is based at the instruction window's upper bound.
        let ram_offset = effective - self.cfg.instr_upper;

        match op {
            MemOp::Store => {
                let value = self.regs.read(reg);
                self.mem.store_le(ram_offset, width, value);
            }
            MemOp::Load { signed } => {
                let raw = self.mem.load_le(ram_offset, width);
                let value = if signed { sign_extend(raw, width) } else { raw };
                // A load into x0 keeps its memory and cache effects; the
                // register file discards the write.
                self.regs.write(reg, value);
            }
        }

        let pc = self.regs.pc();
        self.regs.set_pc(pc.wrapping_add(INSTRUCTION_BYTES));
        Ok(Outcome::Retired)
    }
}
