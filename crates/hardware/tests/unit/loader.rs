//! Program-Text Loader Tests.
//!
//! Verifies header parsing, every operand form, address assignment, the
//! stringify round-trip, and the error taxonomy with line numbers.

use pretty_assertions::assert_eq;
use rv64emu_core::common::error::ParseError;
use rv64emu_core::isa::{Opcode, Operands};
use rv64emu_core::sim::loader::parse_program;

/// A small image exercising one line of every operand format.
const SAMPLE: &str = "\
0x1000 0x1018 0x1000 0x100
add x3,x1,x2
addi x5,x5,-1
lui x6,5
lw x7,8(x2)
beq x1,x2,8
ecall";

fn parsed(text: &str) -> rv64emu_core::sim::loader::Program {
    match parse_program(text) {
        Ok(program) => program,
        Err(e) => panic!("sample program must parse: {e}"),
    }
}

#[test]
fn header_fields_are_hex_decoded() {
    let program = parsed(SAMPLE);
    assert_eq!(program.header.instr_lower, 0x1000);
    assert_eq!(program.header.instr_upper, 0x1018);
    assert_eq!(program.header.entry_address, 0x1000);
    assert_eq!(program.header.memory_sz, 0x100);
}

#[test]
fn every_format_parses() {
    let program = parsed(SAMPLE);
    let ops: Vec<(Opcode, Operands)> = program
        .instructions
        .iter()
        .map(|inst| (inst.opcode, inst.operands))
        .collect();

    assert_eq!(
        ops,
        vec![
            (Opcode::Add, Operands::Rrr { rd: 3, rs1: 1, rs2: 2 }),
            (Opcode::Addi, Operands::Rri { rd: 5, rs1: 5, imm: -1 }),
            (Opcode::Lui, Operands::Ri { rd: 6, imm: 5 }),
            (Opcode::Lw, Operands::RegOffset { reg: 7, base: 2, offset: 8 }),
            (Opcode::Beq, Operands::Rri { rd: 1, rs1: 2, imm: 8 }),
            (Opcode::Ecall, Operands::NoOperand),
        ]
    );
}

#[test]
fn addresses_step_by_four_from_the_window_base() {
    let program = parsed(SAMPLE);
    let addrs: Vec<u64> = program.instructions.iter().map(|i| i.addr).collect();
    assert_eq!(addrs, vec![0x1000, 0x1004, 0x1008, 0x100C, 0x1010, 0x1014]);
}

#[test]
fn jalr_uses_the_reg_offset_form() {
    let program = parsed("0x0 0x4 0x0 0x10\njalr x1,4(x2)");
    assert_eq!(program.instructions[0].opcode, Opcode::Jalr);
    assert_eq!(
        program.instructions[0].operands,
        Operands::RegOffset { reg: 1, base: 2, offset: 4 }
    );
}

#[test]
fn negative_store_offsets_parse() {
    let program = parsed("0x0 0x4 0x0 0x10\nsd x9,-16(x8)");
    assert_eq!(
        program.instructions[0].operands,
        Operands::RegOffset { reg: 9, base: 8, offset: -16 }
    );
}

#[test]
fn stringify_round_trips() {
    let program = parsed(SAMPLE);
    let body: Vec<&str> = SAMPLE.lines().skip(1).collect();
    assert_eq!(program.stringify(), body.join("\n"));
}

#[test]
fn blank_lines_are_ignored() {
    let program = parsed("0x0 0x8 0x0 0x10\n\nadd x1,x1,x1\n\necall\n");
    assert_eq!(program.instructions.len(), 2);
}

// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────

#[test]
fn empty_program_is_rejected() {
    assert_eq!(parse_program(""), Err(ParseError::EmptyProgram));
}

#[test]
fn malformed_header_is_rejected() {
    assert!(matches!(
        parse_program("0x1000 0x1008 0x1000"),
        Err(ParseError::BadHeader { .. })
    ));
    assert!(matches!(
        parse_program("1000 1008 1000 100"),
        Err(ParseError::BadHeader { .. })
    ));
}

#[test]
fn unknown_mnemonic_names_the_line() {
    let err = parse_program("0x0 0x8 0x0 0x10\nadd x1,x1,x1\nmul x1,x1,x1");
    assert_eq!(
        err,
        Err(ParseError::UnknownMnemonic {
            line: 3,
            mnemonic: "mul".to_owned(),
        })
    );
}

#[test]
fn register_above_31_is_rejected() {
    let err = parse_program("0x0 0x4 0x0 0x10\nadd x32,x1,x1");
    assert_eq!(err, Err(ParseError::BadRegister { line: 2, index: 32 }));
}

#[test]
fn operand_format_mismatch_is_rejected() {
    // `add` needs three registers.
    assert!(matches!(
        parse_program("0x0 0x4 0x0 0x10\nadd x1,x2"),
        Err(ParseError::BadOperands { .. })
    ));
    // Loads need the `reg, offset(base)` shape.
    assert!(matches!(
        parse_program("0x0 0x4 0x0 0x10\nlw x1,x2,4"),
        Err(ParseError::BadOperands { .. })
    ));
}
