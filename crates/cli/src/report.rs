//! Console reporter.
//!
//! Renders the core's observation events to stdout in the classic trace
//! format: a full register line at run start, one line per fetched
//! instruction, the non-zero memory bytes and first modified register after
//! each step, and the exception plus cache report at halt.
//!
//! The previously printed register values are state owned by this reporter,
//! not by the core.

use rv64emu_core::core::arch::RegisterSnapshot;
use rv64emu_core::core::cpu::Processor;
use rv64emu_core::isa::abi::REG_COUNT;
use rv64emu_core::isa::Instruction;
use rv64emu_core::{Exception, Reporter};

/// Width of the separator line printed between steps.
const SEPARATOR_WIDTH: usize = 115;

/// Reporter printing the emulation trace to stdout.
#[derive(Debug)]
pub struct ConsoleReporter {
    print_instrs: bool,
    print_regs: bool,
    print_cache: bool,
    prev_regs: [u64; REG_COUNT],
}

impl ConsoleReporter {
    /// Creates a reporter applying the configuration's presentation flags.
    pub fn new(cfg: &rv64emu_core::Configuration) -> Self {
        Self {
            print_instrs: cfg.print_instrs,
            print_regs: cfg.print_regs,
            print_cache: cfg.print_cache,
            prev_regs: [0; REG_COUNT],
        }
    }

    /// Prints the full register state on one line.
    fn print_all_registers(regs: &RegisterSnapshot) {
        print!("pc: {:#x}, ", regs.pc);
        for (i, value) in regs.regs.iter().enumerate() {
            print!("x{i}: {value:#x}");
            if i != REG_COUNT - 1 {
                print!(", ");
            }
        }
        println!();
    }

    /// Prints the first register whose value changed since the last call,
    /// remembering the printed value.
    fn print_modified_register(&mut self, regs: &RegisterSnapshot) {
        print!("pc: {:#x}, ", regs.pc);
        for (i, value) in regs.regs.iter().enumerate() {
            if *value != self.prev_regs[i] {
                println!("modified x{i}: {value:#x}");
                self.prev_regs[i] = *value;
                return;
            }
        }
        println!("no registers modified.");
    }

    /// Prints every non-zero memory byte in address order.
    fn print_memory(proc: &Processor) {
        let mem = proc.memory();
        let mut any = false;
        print!("Memory: ");
        for addr in 0..mem.size() {
            let byte = mem.byte(addr);
            if byte == 0 {
                continue;
            }
            print!("{byte:x} ");
            any = true;
        }
        if !any {
            print!("No store performed so far.");
        }
        println!();
    }

    /// Prints the cache geometry, counters, and hit rate.
    fn print_cache_report(proc: &Processor) {
        let stats = proc.cache().statistics();
        println!("Cache Settings:");
        println!(
            "Cache Lines: {}, Cache Sets: {}",
            proc.config().cache_total_lines,
            proc.config().cache_sets
        );
        println!("Cache State:");
        println!(
            "Cache Accesses: {}, Cache Misses: {}",
            stats.accesses, stats.misses
        );
        println!("Cache Hit Rate: {:.2}%", stats.hit_rate() * 100.0);
    }

    /// Human-readable exception title.
    const fn exception_title(exception: Exception) -> &'static str {
        match exception {
            Exception::InstructionFault => "Instruction exception",
            Exception::MemoryFault => "Memory access exception",
            Exception::Exit => "Process exit",
            Exception::UnknownSyscall => "Unknown syscall exception",
        }
    }
}

impl Reporter for ConsoleReporter {
    fn run_started(&mut self, proc: &Processor) {
        Self::print_all_registers(&proc.registers().snapshot());
    }

    fn instruction_fetched(&mut self, inst: &Instruction) {
        if self.print_instrs {
            println!("{:#x}\t{inst}", inst.addr);
        }
    }

    fn step_completed(&mut self, proc: &Processor) {
        Self::print_memory(proc);
        if self.print_regs {
            self.print_modified_register(&proc.registers().snapshot());
        }
        println!("{}", "-".repeat(SEPARATOR_WIDTH));
    }

    fn registers_dumped(&mut self, regs: &RegisterSnapshot) {
        if self.print_regs {
            Self::print_all_registers(regs);
        }
    }

    fn run_halted(&mut self, exception: Exception, proc: &Processor) {
        println!(
            "{}, register state:",
            Self::exception_title(exception)
        );
        Self::print_all_registers(&proc.registers().snapshot());
        if self.print_cache {
            Self::print_cache_report(proc);
        }
    }
}
