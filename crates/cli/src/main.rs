//! RISC-V 64-bit teaching emulator CLI.
//!
//! This binary is the front end for the emulation core. It performs:
//! 1. **Input:** Reads program text from stdin (default) or a file.
//! 2. **Loading:** Parses the image, then verifies the parse round-trips to
//!    the input text before anything executes.
//! 3. **Emulation:** Builds the processor from the image header plus the
//!    command-line flags and runs it to halt, tracing through the console
//!    reporter.
//! 4. **Results:** Optionally emits final registers and cache statistics as
//!    JSON; exits 0 on a clean program exit and 1 on any fault.

mod report;

use std::io::Read;
use std::path::PathBuf;
use std::{fs, io, process};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rv64emu_core::sim::loader::{self, Program};
use rv64emu_core::{Configuration, Processor};

use crate::report::ConsoleReporter;

#[derive(Parser, Debug)]
#[command(
    name = "rv64emu",
    version,
    about = "RISC-V 64-bit teaching emulator",
    long_about = "Emulate a program image over a reduced RV64 instruction set, tracing every \
                  architectural effect: register writes, memory contents, and the hit/miss \
                  behavior of a direct-mapped cache.\n\nThe program image is read from stdin \
                  unless --file is given.\n\nExamples:\n  rv64emu < programs/loop.txt\n  \
                  rv64emu --file programs/loop.txt --cache-values=4,4 --no-print-instr"
)]
struct Cli {
    /// Program text file; reads stdin when omitted.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Suppress the per-instruction trace.
    #[arg(long = "no-print-instr")]
    no_print_instr: bool,

    /// Suppress register-delta and register-dump output.
    #[arg(long = "no-print-regs")]
    no_print_regs: bool,

    /// Suppress the cache report at halt.
    #[arg(long = "no-print-cache")]
    no_print_cache: bool,

    /// Cache geometry as `<total-lines>,<sets>`.
    #[arg(
        long = "cache-values",
        value_name = "LINES,SETS",
        default_value = "1,1",
        value_parser = parse_cache_values
    )]
    cache_values: (u64, u64),

    /// Emit final registers and cache statistics as JSON on stdout.
    #[arg(long = "json-stats")]
    json_stats: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let text = read_program(cli.file.as_deref());
    let program = loader::parse_program(&text).unwrap_or_else(|e| {
        eprintln!("[!] Cannot parse program: {e}");
        process::exit(1);
    });
    verify_round_trip(&text, &program);

    let (cache_total_lines, cache_sets) = cli.cache_values;
    let cfg = Configuration {
        print_instrs: !cli.no_print_instr,
        print_regs: !cli.no_print_regs,
        print_cache: !cli.no_print_cache,
        cache_sets,
        cache_total_lines,
        ..Configuration::for_program(&program.header)
    };

    let mut processor = Processor::new(cfg, program.instructions).unwrap_or_else(|e| {
        eprintln!("[!] Invalid configuration: {e}");
        process::exit(1);
    });

    let mut reporter = ConsoleReporter::new(processor.config());
    let exception = processor.run(&mut reporter);

    if cli.json_stats {
        let summary = serde_json::json!({
            "outcome": exception.to_string(),
            "registers": processor.registers().snapshot(),
            "cache": processor.cache().statistics(),
        });
        println!("{summary}");
    }

    process::exit(i32::from(exception.is_fault()));
}

/// Reads the program text from the given file, or from stdin when absent.
fn read_program(file: Option<&std::path::Path>) -> String {
    match file {
        Some(path) => fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("[!] Cannot read program from '{}': {e}", path.display());
            process::exit(1);
        }),
        None => {
            let mut text = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut text) {
                eprintln!("[!] Cannot read program from stdin: {e}");
                process::exit(1);
            }
            text
        }
    }
}

/// Verifies that the parsed program renders back to the input text, printing
/// the first differing lines and exiting on mismatch.
fn verify_round_trip(text: &str, program: &Program) {
    let input: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .skip(1)
        .collect();
    let rendered = program.stringify();
    let rendered: Vec<&str> = rendered.lines().collect();

    if input == rendered {
        return;
    }

    eprintln!("[!] Instruction parse failed. Differences:");
    for (index, (input_line, rendered_line)) in input.iter().zip(&rendered).enumerate() {
        if input_line != rendered_line {
            eprintln!(
                "line {index}, input program:\n{input_line}\nprocessed instructions:\n{rendered_line}"
            );
        }
    }
    process::exit(1);
}

/// Parses the `<total-lines>,<sets>` cache geometry argument.
fn parse_cache_values(arg: &str) -> Result<(u64, u64), String> {
    let (lines, sets) = arg
        .split_once(',')
        .ok_or_else(|| "expected <total-lines>,<sets>".to_owned())?;
    let lines = lines
        .trim()
        .parse()
        .map_err(|e| format!("bad line count: {e}"))?;
    let sets = sets
        .trim()
        .parse()
        .map_err(|e| format!("bad set count: {e}"))?;
    Ok((lines, sets))
}
