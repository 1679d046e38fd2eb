//! Comparisons, branches, and jumps.
//!
//! The default next program counter is `pc + 4`. Branches compare two register
//! values (signed for `blt`/`bge`, unsigned otherwise) and redirect to
//! `pc + imm` only when the condition holds. `jal` links `pc + 4` and jumps to
//! `pc + imm`; `jalr` computes `(base + imm) & !1` (low bit cleared), links
//! `pc + 4`, and jumps there; `auipc` writes `pc + (imm << 12)` and falls
//! through. The program counter is written exactly once, at the end of the
//! handler.

use super::{Outcome, Processor};
use crate::common::error::Exception;
use crate::isa::abi::INSTRUCTION_BYTES;
use crate::isa::{Instruction, Opcode, Operands};

impl Processor {
    /// Executes the instruction if it is a comparison, branch, or jump;
    /// otherwise makes no state change.
    pub(super) fn exec_control_flow(&mut self, inst: &Instruction) -> Result<Outcome, Exception> {
        let pc = self.regs.pc();
        let mut next_pc = pc.wrapping_add(INSTRUCTION_BYTES);

        match inst.opcode {
            Opcode::Slt => {
                let (rd, a, b) = self.rrr_vals(inst)?;
                self.regs.write(rd, u64::from((a as i64) < (b as i64)));
            }
            Opcode::Sltu => {
                let (rd, a, b) = self.rrr_vals(inst)?;
                self.regs.write(rd, u64::from(a < b));
            }
            Opcode::Slti => {
                let (rd, a, imm) = self.rri_vals(inst)?;
                self.regs.write(rd, u64::from((a as i64) < imm));
            }
            Opcode::Sltiu => {
                let (rd, a, imm) = self.rri_vals(inst)?;
                self.regs.write(rd, u64::from(a < imm as u64));
            }

            Opcode::Beq | Opcode::Bne | Opcode::Blt | Opcode::Bge | Opcode::Bltu
            | Opcode::Bgeu => {
                let (lhs, rhs, imm) = self.branch_ops(inst)?;
                let taken = match inst.opcode {
                    Opcode::Beq => lhs == rhs,
                    Opcode::Bne => lhs != rhs,
                    Opcode::Blt => (lhs as i64) < (rhs as i64),
                    Opcode::Bge => (lhs as i64) >= (rhs as i64),
                    Opcode::Bltu => lhs < rhs,
                    _ => lhs >= rhs,
                };
                if taken {
                    next_pc = pc.wrapping_add(imm as u64);
                }
            }

            Opcode::Jal => {
                let (rd, imm) = Self::ri_ops(inst)?;
                self.regs.write(rd, pc.wrapping_add(INSTRUCTION_BYTES));
                next_pc = pc.wrapping_add(imm as u64);
            }
            Opcode::Jalr => {
                let Operands::RegOffset { reg: rd, base, offset } = inst.operands else {
                    return Err(Exception::InstructionFault);
                };
                let target = self.regs.read(base).wrapping_add(offset as u64) & !1;
                self.regs.write(rd, pc.wrapping_add(INSTRUCTION_BYTES));
                next_pc = target;
            }
            Opcode::Auipc => {
                let (rd, imm) = Self::ri_ops(inst)?;
                self.regs
                    .write(rd, pc.wrapping_add((imm as u64).wrapping_shl(12)));
            }

            _ => return Ok(Outcome::NotClaimed),
        }

        self.regs.set_pc(next_pc);
        Ok(Outcome::Retired)
    }

    /// Both comparison values and the offset of a branch instruction.
    ///
    /// Branches reuse the RRI shape with the `rd` and `rs1` fields as
    /// comparison operands.
    fn branch_ops(&self, inst: &Instruction) -> Result<(u64, u64, i64), Exception> {
        match inst.operands {
            Operands::Rri { rd, rs1, imm } => {
                Ok((self.regs.read(rd), self.regs.read(rs1), imm))
            }
            _ => Err(Exception::InstructionFault),
        }
    }
}
