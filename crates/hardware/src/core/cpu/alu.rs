//! Arithmetic/logical register operations and the system call.
//!
//! All arithmetic is wrapping at the register width. Full-width shift amounts
//! are masked to 6 bits; "W" (32-bit narrow) shift amounts to 5 bits. W-variant
//! operations truncate their operands to 32 bits, compute at that width, and
//! sign-extend the 32-bit result into the 64-bit destination. Every
//! instruction in this group advances the program counter by 4 after its
//! mutation.

use super::{Outcome, Processor};
use crate::common::error::Exception;
use crate::isa::abi::{INSTRUCTION_BYTES, REG_SYSCALL, SYSCALL_DUMP_REGS, SYSCALL_EXIT};
use crate::isa::{Instruction, Opcode};
use crate::report::Reporter;

/// Mask for 64-bit shift amounts.
const SHAMT_MASK: u64 = 0x3F;
/// Mask for 32-bit ("W") shift amounts.
const SHAMT_MASK_W: u64 = 0x1F;

/// Sign-extends a 32-bit result into a 64-bit register value.
const fn sext32(value: i32) -> u64 {
    value as i64 as u64
}

impl Processor {
    /// Executes the instruction if it is an arithmetic/logical register
    /// operation or the system call; otherwise makes no state change.
    pub(super) fn exec_int_ops(
        &mut self,
        inst: &Instruction,
        reporter: &mut dyn Reporter,
    ) -> Result<Outcome, Exception> {
        let pc = self.regs.pc();

        let (rd, value) = match inst.opcode {
            Opcode::Ecall => return self.exec_syscall(reporter),

            Opcode::Add => {
                let (rd, a, b) = self.rrr_vals(inst)?;
                (rd, a.wrapping_add(b))
            }
            Opcode::Sub => {
                let (rd, a, b) = self.rrr_vals(inst)?;
                (rd, a.wrapping_sub(b))
            }
            Opcode::Or => {
                let (rd, a, b) = self.rrr_vals(inst)?;
                (rd, a | b)
            }
            Opcode::And => {
                let (rd, a, b) = self.rrr_vals(inst)?;
                (rd, a & b)
            }
            Opcode::Xor => {
                let (rd, a, b) = self.rrr_vals(inst)?;
                (rd, a ^ b)
            }
            Opcode::Sll => {
                let (rd, a, b) = self.rrr_vals(inst)?;
                (rd, a << (b & SHAMT_MASK))
            }
            Opcode::Srl => {
                let (rd, a, b) = self.rrr_vals(inst)?;
                (rd, a >> (b & SHAMT_MASK))
            }
            Opcode::Sra => {
                let (rd, a, b) = self.rrr_vals(inst)?;
                (rd, ((a as i64) >> (b & SHAMT_MASK)) as u64)
            }

            Opcode::Addi => {
                let (rd, a, imm) = self.rri_vals(inst)?;
                (rd, a.wrapping_add(imm as u64))
            }
            Opcode::Ori => {
                let (rd, a, imm) = self.rri_vals(inst)?;
                (rd, a | imm as u64)
            }
            Opcode::Andi => {
                let (rd, a, imm) = self.rri_vals(inst)?;
                (rd, a & imm as u64)
            }
            Opcode::Xori => {
                let (rd, a, imm) = self.rri_vals(inst)?;
                (rd, a ^ imm as u64)
            }
            Opcode::Slli => {
                let (rd, a, imm) = self.rri_vals(inst)?;
                (rd, a << (imm as u64 & SHAMT_MASK))
            }
            Opcode::Srli => {
                let (rd, a, imm) = self.rri_vals(inst)?;
                (rd, a >> (imm as u64 & SHAMT_MASK))
            }
            Opcode::Srai => {
                let (rd, a, imm) = self.rri_vals(inst)?;
                (rd, ((a as i64) >> (imm as u64 & SHAMT_MASK)) as u64)
            }

            Opcode::Addw => {
                let (rd, a, b) = self.rrr_vals(inst)?;
                (rd, sext32((a as i32).wrapping_add(b as i32)))
            }
            Opcode::Subw => {
                let (rd, a, b) = self.rrr_vals(inst)?;
                (rd, sext32((a as i32).wrapping_sub(b as i32)))
            }
            Opcode::Sllw => {
                let (rd, a, b) = self.rrr_vals(inst)?;
                (rd, sext32((a as i32) << (b & SHAMT_MASK_W)))
            }
            Opcode::Srlw => {
                let (rd, a, b) = self.rrr_vals(inst)?;
                (rd, sext32(((a as u32) >> (b & SHAMT_MASK_W)) as i32))
            }
            Opcode::Sraw => {
                let (rd, a, b) = self.rrr_vals(inst)?;
                (rd, sext32((a as i32) >> (b & SHAMT_MASK_W)))
            }
            Opcode::Addiw => {
                let (rd, a, imm) = self.rri_vals(inst)?;
                (rd, sext32((a as i32).wrapping_add(imm as i32)))
            }
            Opcode::Slliw => {
                let (rd, a, imm) = self.rri_vals(inst)?;
                (rd, sext32((a as i32) << (imm as u64 & SHAMT_MASK_W)))
            }
            Opcode::Srliw => {
                let (rd, a, imm) = self.rri_vals(inst)?;
                (rd, sext32(((a as u32) >> (imm as u64 & SHAMT_MASK_W)) as i32))
            }
            Opcode::Sraiw => {
                let (rd, a, imm) = self.rri_vals(inst)?;
                (rd, sext32((a as i32) >> (imm as u64 & SHAMT_MASK_W)))
            }

            Opcode::Lui => {
                let (rd, imm) = Self::ri_ops(inst)?;
                (rd, imm.wrapping_shl(12) as u64)
            }

            _ => return Ok(Outcome::NotClaimed),
        };

        self.regs.write(rd, value);
        self.regs.set_pc(pc.wrapping_add(INSTRUCTION_BYTES));
        Ok(Outcome::Retired)
    }

    /// Executes the system call.
    ///
    /// The call number is read from `x17`: 23 dumps the full register state
    /// through the reporter and continues, 2 requests a clean exit, anything
    /// else is an unknown-syscall fault.
    fn exec_syscall(&mut self, reporter: &mut dyn Reporter) -> Result<Outcome, Exception> {
        let number = self.regs.read(REG_SYSCALL);
        match number {
            SYSCALL_DUMP_REGS => {
                reporter.registers_dumped(&self.regs.snapshot());
                let pc = self.regs.pc();
                self.regs.set_pc(pc.wrapping_add(INSTRUCTION_BYTES));
                Ok(Outcome::Retired)
            }
            SYSCALL_EXIT => Err(Exception::Exit),
            _ => Err(Exception::UnknownSyscall),
        }
    }
}
