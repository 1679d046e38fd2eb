//! Arithmetic/Logical Operation Tests.
//!
//! Table-driven checks of the integer handler: wrapping 64-bit arithmetic,
//! shift-amount masking, and the W-variant truncate/sign-extend rule. Every
//! case also confirms the program counter advanced by one instruction.

use rstest::rstest;
use rv64emu_core::Processor;
use rv64emu_core::isa::{Opcode, Operands};

use crate::common::{INSTR_LOWER, processor, step_ok};

/// Runs one RRR instruction with `x1 = a`, `x2 = b`, destination `x3`.
fn run_rrr(op: Opcode, a: u64, b: u64) -> Processor {
    let mut proc = processor(&[(op, Operands::Rrr { rd: 3, rs1: 1, rs2: 2 })]);
    proc.registers_mut().write(1, a);
    proc.registers_mut().write(2, b);
    step_ok(&mut proc);
    proc
}

/// Runs one RRI instruction with `x1 = a`, destination `x3`.
fn run_rri(op: Opcode, a: u64, imm: i64) -> Processor {
    let mut proc = processor(&[(op, Operands::Rri { rd: 3, rs1: 1, imm })]);
    proc.registers_mut().write(1, a);
    step_ok(&mut proc);
    proc
}

#[rstest]
#[case::add(Opcode::Add, 10, 20, 30)]
#[case::add_wraps(Opcode::Add, u64::MAX, 1, 0)]
#[case::sub(Opcode::Sub, 30, 10, 20)]
#[case::sub_wraps(Opcode::Sub, 0, 1, u64::MAX)]
#[case::or(Opcode::Or, 0b1100, 0b1010, 0b1110)]
#[case::and(Opcode::And, 0b1100, 0b1010, 0b1000)]
#[case::xor(Opcode::Xor, 0b1100, 0b1010, 0b0110)]
#[case::sll(Opcode::Sll, 1, 8, 256)]
#[case::sll_masks_to_six_bits(Opcode::Sll, 1, 65, 2)]
#[case::srl(Opcode::Srl, 256, 8, 1)]
#[case::srl_is_logical(Opcode::Srl, u64::MAX, 63, 1)]
#[case::sra_is_arithmetic(Opcode::Sra, (-8i64) as u64, 1, (-4i64) as u64)]
#[case::sra_masks_to_six_bits(Opcode::Sra, (-8i64) as u64, 65, (-4i64) as u64)]
fn rrr_arithmetic(#[case] op: Opcode, #[case] a: u64, #[case] b: u64, #[case] expected: u64) {
    let proc = run_rrr(op, a, b);
    assert_eq!(proc.registers().read(3), expected);
    assert_eq!(proc.registers().pc(), INSTR_LOWER + 4);
}

#[rstest]
#[case::addw_overflows_at_32_bits(Opcode::Addw, 0x7FFF_FFFF, 1, 0xFFFF_FFFF_8000_0000)]
#[case::addw_ignores_upper_source_bits(Opcode::Addw, 0x1_0000_0001, 1, 2)]
#[case::subw(Opcode::Subw, 1, 2, u64::MAX)]
#[case::sllw_masks_to_five_bits(Opcode::Sllw, 1, 33, 2)]
#[case::sllw_sign_extends(Opcode::Sllw, 1, 31, 0xFFFF_FFFF_8000_0000)]
#[case::srlw_shifts_the_low_word(Opcode::Srlw, 0xFFFF_FFFF_8000_0000, 4, 0x0800_0000)]
#[case::sraw_keeps_the_word_sign(Opcode::Sraw, 0x8000_0000, 4, 0xFFFF_FFFF_F800_0000)]
fn rrr_word_variants(#[case] op: Opcode, #[case] a: u64, #[case] b: u64, #[case] expected: u64) {
    let proc = run_rrr(op, a, b);
    assert_eq!(proc.registers().read(3), expected);
}

#[rstest]
#[case::addi(Opcode::Addi, 10, 5, 15)]
#[case::addi_negative(Opcode::Addi, 10, -3, 7)]
#[case::ori(Opcode::Ori, 0b1100, 0b1010, 0b1110)]
#[case::andi(Opcode::Andi, 0b1100, 0b1010, 0b1000)]
#[case::xori(Opcode::Xori, 0b1100, 0b1010, 0b0110)]
#[case::slli(Opcode::Slli, 1, 6, 64)]
#[case::srli(Opcode::Srli, 64, 6, 1)]
#[case::srai(Opcode::Srai, (-64i64) as u64, 3, (-8i64) as u64)]
#[case::addiw_wraps_at_32_bits(Opcode::Addiw, 0x7FFF_FFFF, 1, 0xFFFF_FFFF_8000_0000)]
#[case::slliw_sign_extends(Opcode::Slliw, 1, 31, 0xFFFF_FFFF_8000_0000)]
#[case::srliw_zero_fills_the_word(Opcode::Srliw, 0x8000_0000, 4, 0x0800_0000)]
#[case::sraiw_keeps_the_word_sign(Opcode::Sraiw, 0x8000_0000, 4, 0xFFFF_FFFF_F800_0000)]
fn rri_arithmetic(#[case] op: Opcode, #[case] a: u64, #[case] imm: i64, #[case] expected: u64) {
    let proc = run_rri(op, a, imm);
    assert_eq!(proc.registers().read(3), expected);
    assert_eq!(proc.registers().pc(), INSTR_LOWER + 4);
}

#[test]
fn lui_shifts_the_immediate() {
    let mut proc = processor(&[(Opcode::Lui, Operands::Ri { rd: 6, imm: 5 })]);
    step_ok(&mut proc);
    assert_eq!(proc.registers().read(6), 0x5000);
}

#[test]
fn lui_keeps_the_immediate_sign() {
    let mut proc = processor(&[(Opcode::Lui, Operands::Ri { rd: 6, imm: -1 })]);
    step_ok(&mut proc);
    assert_eq!(proc.registers().read(6), 0xFFFF_FFFF_FFFF_F000);
}

#[test]
fn writes_to_x0_are_discarded() {
    let proc = run_rrr_into_x0();
    assert_eq!(proc.registers().read(0), 0);
    assert_eq!(proc.registers().pc(), INSTR_LOWER + 4, "pc still advances");
}

fn run_rrr_into_x0() -> Processor {
    let mut proc = processor(&[(Opcode::Add, Operands::Rrr { rd: 0, rs1: 1, rs2: 2 })]);
    proc.registers_mut().write(1, 1);
    proc.registers_mut().write(2, 2);
    step_ok(&mut proc);
    proc
}
