//! Program-text loader.
//!
//! This module parses a program image from its textual form. It performs:
//! 1. **Header parsing:** The first line holds four hexadecimal fields —
//!    instruction window lower/upper bounds, entry address, and memory size.
//! 2. **Instruction parsing:** One instruction per line in assembly form
//!    (`add x1,x2,x3`, `addi x1,x2,10`, `lui x1,5`, `lw x2,0(x1)`,
//!    `jalr x1,4(x2)`, `beq x1,x2,8`, `ecall`), validated against each
//!    opcode's operand format with register indices in `x0`..`x31`.
//! 3. **Stringification:** The inverse rendering used to verify a parse
//!    round-trips to the input text.
//!
//! Instruction addresses are contiguous 4-byte steps from the window's lower
//! bound. Malformed input is rejected with a [`ParseError`] naming the
//! offending 1-based line; blank lines are ignored and do not count.

use crate::common::error::ParseError;
use crate::isa::abi::INSTRUCTION_BYTES;
use crate::isa::{Format, Instruction, Opcode, Operands};

/// Address-layout header of a program image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramHeader {
    /// Lowest instruction address.
    pub instr_lower: u64,
    /// One past the highest instruction address.
    pub instr_upper: u64,
    /// Address of the first instruction to execute.
    pub entry_address: u64,
    /// Data memory size in bytes.
    pub memory_sz: u64,
}

/// A parsed program image: layout header plus ordered instruction records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// Address-layout header from the image's first line.
    pub header: ProgramHeader,
    /// Instructions indexed by `(address - instr_lower) / 4`.
    pub instructions: Vec<Instruction>,
}

impl Program {
    /// Renders the instructions back to program text, one per line, without
    /// the header. This is the inverse of [`parse_program`] and feeds the
    /// round-trip validation of the front end.
    pub fn stringify(&self) -> String {
        self.instructions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Parses a program image from text.
///
/// # Errors
///
/// Returns a [`ParseError`] for an empty image, a malformed header, an
/// unknown mnemonic, operands that do not match the opcode's format, or a
/// register index above 31.
pub fn parse_program(text: &str) -> Result<Program, ParseError> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .enumerate()
        .filter(|(_, line)| !line.is_empty());

    let (_, header_line) = lines.next().ok_or(ParseError::EmptyProgram)?;
    let header = parse_header(header_line)?;

    let mut instructions = Vec::new();
    for (index, line) in lines {
        let addr = header
            .instr_lower
            .wrapping_add(instructions.len() as u64 * INSTRUCTION_BYTES);
        instructions.push(parse_instruction(index + 1, line, addr)?);
    }

    Ok(Program {
        header,
        instructions,
    })
}

/// Parses the four-field hexadecimal header line.
fn parse_header(line: &str) -> Result<ProgramHeader, ParseError> {
    let bad = || ParseError::BadHeader {
        text: line.to_owned(),
    };

    let fields = line
        .split_whitespace()
        .map(parse_hex)
        .collect::<Option<Vec<u64>>>()
        .ok_or_else(|| bad())?;
    let [instr_lower, instr_upper, entry_address, memory_sz] =
        <[u64; 4]>::try_from(fields).map_err(|_| bad())?;

    Ok(ProgramHeader {
        instr_lower,
        instr_upper,
        entry_address,
        memory_sz,
    })
}

/// Parses a `0x`-prefixed hexadecimal field.
fn parse_hex(token: &str) -> Option<u64> {
    u64::from_str_radix(token.strip_prefix("0x")?, 16).ok()
}

/// Parses one instruction line at the given address.
fn parse_instruction(line_no: usize, line: &str, addr: u64) -> Result<Instruction, ParseError> {
    let (mnemonic, rest) = match line.split_once(char::is_whitespace) {
        Some((mnemonic, rest)) => (mnemonic, rest.trim()),
        None => (line, ""),
    };

    let opcode = Opcode::from_mnemonic(mnemonic).ok_or_else(|| ParseError::UnknownMnemonic {
        line: line_no,
        mnemonic: mnemonic.to_owned(),
    })?;

    let fields = OperandText {
        line_no,
        mnemonic,
        rest,
    };
    let operands = match opcode.format() {
        Format::Rrr => fields.rrr()?,
        Format::Rri => fields.rri()?,
        Format::Ri => fields.ri()?,
        Format::RegOffset => fields.reg_offset()?,
        Format::NoOperand => fields.no_operand()?,
    };

    Ok(Instruction::new(opcode, addr, operands))
}

/// Operand text of one instruction line, with enough context for errors.
struct OperandText<'a> {
    line_no: usize,
    mnemonic: &'a str,
    rest: &'a str,
}

impl OperandText<'_> {
    fn bad(&self) -> ParseError {
        ParseError::BadOperands {
            line: self.line_no,
            mnemonic: self.mnemonic.to_owned(),
            text: self.rest.to_owned(),
        }
    }

    /// Parses an `xN` register token, enforcing the `x0`..`x31` range.
    fn reg(&self, token: &str) -> Result<u8, ParseError> {
        let digits = token.trim().strip_prefix('x').ok_or_else(|| self.bad())?;
        let index: u64 = digits.parse().map_err(|_| self.bad())?;
        if index > 31 {
            return Err(ParseError::BadRegister {
                line: self.line_no,
                index,
            });
        }
        Ok(index as u8)
    }

    /// Parses a signed decimal immediate token.
    fn imm(&self, token: &str) -> Result<i64, ParseError> {
        token.trim().parse().map_err(|_| self.bad())
    }

    /// Splits the operand text into exactly `N` comma-separated pieces.
    fn split<const N: usize>(&self) -> Result<[&str; N], ParseError> {
        let pieces: Vec<&str> = self.rest.split(',').collect();
        <[&str; N]>::try_from(pieces).map_err(|_| self.bad())
    }

    fn rrr(&self) -> Result<Operands, ParseError> {
        let [rd, rs1, rs2] = self.split()?;
        Ok(Operands::Rrr {
            rd: self.reg(rd)?,
            rs1: self.reg(rs1)?,
            rs2: self.reg(rs2)?,
        })
    }

    fn rri(&self) -> Result<Operands, ParseError> {
        let [rd, rs1, imm] = self.split()?;
        Ok(Operands::Rri {
            rd: self.reg(rd)?,
            rs1: self.reg(rs1)?,
            imm: self.imm(imm)?,
        })
    }

    fn ri(&self) -> Result<Operands, ParseError> {
        let [rd, imm] = self.split()?;
        Ok(Operands::Ri {
            rd: self.reg(rd)?,
            imm: self.imm(imm)?,
        })
    }

    /// Parses the `reg, offset(base)` shape shared by loads, stores, and `jalr`.
    fn reg_offset(&self) -> Result<Operands, ParseError> {
        let [reg, addressed] = self.split()?;
        let addressed = addressed.trim();

        let open = addressed.find('(').ok_or_else(|| self.bad())?;
        let close = addressed.rfind(')').ok_or_else(|| self.bad())?;
        if close != addressed.len() - 1 || open > close {
            return Err(self.bad());
        }

        Ok(Operands::RegOffset {
            reg: self.reg(reg)?,
            base: self.reg(&addressed[open + 1..close])?,
            offset: self.imm(&addressed[..open])?,
        })
    }

    fn no_operand(&self) -> Result<Operands, ParseError> {
        if self.rest.is_empty() {
            Ok(Operands::NoOperand)
        } else {
            Err(self.bad())
        }
    }
}
