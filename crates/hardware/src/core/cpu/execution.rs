//! Fetch/dispatch execution loop.
//!
//! This module implements the per-step protocol of the execution engine:
//! 1. **Fetch:** Validate the program counter against the instruction window
//!    and index the program image.
//! 2. **Dispatch:** Offer the instruction to the three handlers in fixed order
//!    (integer ops, memory ops, control flow); each claims a disjoint, closed
//!    opcode subset or makes no state change at all.
//! 3. **Retire/Halt:** Report step completion, or surface the terminal
//!    exception to the caller.
//!
//! An opcode claimed by no handler is a fatal inconsistency and raises an
//! instruction fault.

use tracing::{debug, trace};

use super::Processor;
use crate::common::error::Exception;
use crate::isa::Instruction;
use crate::isa::abi::INSTRUCTION_BYTES;
use crate::report::Reporter;

/// Result of offering an instruction to one execution handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The handler recognized the opcode and fully executed the instruction,
    /// including the program-counter update.
    Retired,
    /// The opcode belongs to another handler; no state was changed.
    NotClaimed,
}

impl Processor {
    /// Runs the program until it halts.
    ///
    /// Every terminal outcome is an [`Exception`]; `Exception::Exit` is the
    /// successful one. The reporter observes the run start, every fetch and
    /// step, and the halt with its final state.
    pub fn run(&mut self, reporter: &mut dyn Reporter) -> Exception {
        debug!(pc = self.regs.pc(), "emulation started");
        reporter.run_started(self);
        loop {
            if let Err(exception) = self.step(reporter) {
                debug!(%exception, pc = self.regs.pc(), "emulation halted");
                reporter.run_halted(exception, self);
                return exception;
            }
        }
    }

    /// Executes exactly one instruction.
    ///
    /// # Errors
    ///
    /// Returns the terminal [`Exception`] when the program counter leaves the
    /// instruction window, no handler claims the opcode, or the claiming
    /// handler faults. A faulting step makes no state change.
    pub fn step(&mut self, reporter: &mut dyn Reporter) -> Result<(), Exception> {
        let pc = self.regs.pc();
        if pc < self.cfg.instr_lower || pc >= self.cfg.instr_upper {
            return Err(Exception::InstructionFault);
        }

        let index = ((pc - self.cfg.instr_lower) / INSTRUCTION_BYTES) as usize;
        let inst = *self
            .program
            .get(index)
            .ok_or(Exception::InstructionFault)?;

        reporter.instruction_fetched(&inst);
        trace!(pc = format_args!("{pc:#x}"), %inst, "fetched");

        match self.dispatch(&inst, reporter)? {
            Outcome::Retired => {
                reporter.step_completed(self);
                Ok(())
            }
            Outcome::NotClaimed => Err(Exception::InstructionFault),
        }
    }

    /// Offers the instruction to each handler in fixed order.
    fn dispatch(
        &mut self,
        inst: &Instruction,
        reporter: &mut dyn Reporter,
    ) -> Result<Outcome, Exception> {
        if let Outcome::Retired = self.exec_int_ops(inst, reporter)? {
            return Ok(Outcome::Retired);
        }
        if let Outcome::Retired = self.exec_mem_ops(inst)? {
            return Ok(Outcome::Retired);
        }
        self.exec_control_flow(inst)
    }
}
