//! Processor state and construction.
//!
//! The [`Processor`] exclusively owns the register file, data memory, cache
//! simulator, program image, and a configuration snapshot for its entire
//! lifetime; nothing else may mutate them. Execution is single-threaded and
//! fully synchronous — one instruction completes (including its register,
//! memory, and cache mutations) before the next is fetched — so exclusivity
//! needs no locking discipline.
//!
//! Execution itself lives in the sibling handler modules: `execution` drives
//! the fetch/dispatch loop, and `alu`, `mem`, and `control` implement the
//! three semantic groups.

mod alu;
mod control;
mod execution;
mod mem;

pub use execution::Outcome;

use crate::common::error::{ConfigError, Exception};
use crate::config::Configuration;
use crate::core::arch::RegisterFile;
use crate::core::cache::CacheSim;
use crate::core::memory::Memory;
use crate::isa::{Instruction, Operands};

/// The emulated processor.
///
/// Owns all architectural and micro-architectural state of one run.
#[derive(Debug)]
pub struct Processor {
    cfg: Configuration,
    regs: RegisterFile,
    mem: Memory,
    cache: CacheSim,
    program: Vec<Instruction>,
}

impl Processor {
    /// Builds a processor for a program image.
    ///
    /// Registers start zeroed with the program counter at the configured entry
    /// address; memory starts zeroed; all cache lines start invalid.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the cache geometry is invalid
    /// (`cache_total_lines != cache_sets`, or zero sets). Configuration errors
    /// are reported here, before the run loop, never mid-run.
    pub fn new(cfg: Configuration, program: Vec<Instruction>) -> Result<Self, ConfigError> {
        let cache = CacheSim::new(cfg.cache_total_lines, cfg.cache_sets)?;
        let regs = RegisterFile::new(cfg.entry_address);
        let mem = Memory::new(cfg.memory_sz);
        Ok(Self {
            cfg,
            regs,
            mem,
            cache,
            program,
        })
    }

    /// The configuration snapshot this processor was built with.
    pub const fn config(&self) -> &Configuration {
        &self.cfg
    }

    /// Current register state.
    pub const fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    /// Mutable register state, for seeding test and boot conditions.
    pub fn registers_mut(&mut self) -> &mut RegisterFile {
        &mut self.regs
    }

    /// Current data memory.
    pub const fn memory(&self) -> &Memory {
        &self.mem
    }

    /// Current cache state.
    pub const fn cache(&self) -> &CacheSim {
        &self.cache
    }

    /// The loaded program image.
    pub fn program(&self) -> &[Instruction] {
        &self.program
    }

    /// Destination index and both source values of an RRR instruction.
    fn rrr_vals(&self, inst: &Instruction) -> Result<(u8, u64, u64), Exception> {
        match inst.operands {
            Operands::Rrr { rd, rs1, rs2 } => {
                Ok((rd, self.regs.read(rs1), self.regs.read(rs2)))
            }
            _ => Err(Exception::InstructionFault),
        }
    }

    /// Destination index, source value, and immediate of an RRI instruction.
    fn rri_vals(&self, inst: &Instruction) -> Result<(u8, u64, i64), Exception> {
        match inst.operands {
            Operands::Rri { rd, rs1, imm } => Ok((rd, self.regs.read(rs1), imm)),
            _ => Err(Exception::InstructionFault),
        }
    }

    /// Destination index and immediate of an RI instruction.
    fn ri_ops(inst: &Instruction) -> Result<(u8, i64), Exception> {
        match inst.operands {
            Operands::Ri { rd, imm } => Ok((rd, imm)),
            _ => Err(Exception::InstructionFault),
        }
    }
}
