//! Instruction set model.
//!
//! This module defines the instruction vocabulary of the emulated machine:
//! 1. **Opcodes:** The closed set of recognized operations.
//! 2. **Formats:** The operand shape dictated by each opcode.
//! 3. **Operands:** A tagged sum over the four operand shapes (plus the
//!    operand-less system call), making it impossible to read fields that an
//!    instruction does not carry.
//! 4. **Categories:** The total opcode-to-handler mapping used by dispatch.
//!
//! Instruction text rendering ([`fmt::Display`]) reproduces the program-image
//! assembly forms, so a parsed program can be stringified back for validation.

use std::fmt;

pub mod abi;

/// Operations recognized by the emulator.
///
/// The enumeration is closed: every opcode belongs to exactly one
/// [`Category`] and dictates exactly one operand [`Format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// System call; the call number is read from `x17`.
    Ecall,
    /// 64-bit register add.
    Add,
    /// 32-bit register add, result sign-extended.
    Addw,
    /// 64-bit add immediate.
    Addi,
    /// 32-bit add immediate, result sign-extended.
    Addiw,
    /// 64-bit register subtract.
    Sub,
    /// 32-bit register subtract, result sign-extended.
    Subw,
    /// Logical shift left by register (6-bit amount).
    Sll,
    /// 32-bit logical shift left by register (5-bit amount).
    Sllw,
    /// Logical shift right by register (6-bit amount).
    Srl,
    /// 32-bit logical shift right by register (5-bit amount).
    Srlw,
    /// Arithmetic shift right by register (6-bit amount).
    Sra,
    /// 32-bit arithmetic shift right by register (5-bit amount).
    Sraw,
    /// Logical shift left by immediate.
    Slli,
    /// 32-bit logical shift left by immediate.
    Slliw,
    /// Logical shift right by immediate.
    Srli,
    /// 32-bit logical shift right by immediate.
    Srliw,
    /// Arithmetic shift right by immediate.
    Srai,
    /// 32-bit arithmetic shift right by immediate.
    Sraiw,
    /// Bitwise OR.
    Or,
    /// Bitwise OR with immediate.
    Ori,
    /// Bitwise AND.
    And,
    /// Bitwise AND with immediate.
    Andi,
    /// Bitwise XOR.
    Xor,
    /// Bitwise XOR with immediate.
    Xori,
    /// Load upper immediate (`rd = imm << 12`).
    Lui,
    /// Set if less than, signed.
    Slt,
    /// Set if less than, unsigned.
    Sltu,
    /// Set if less than immediate, signed.
    Slti,
    /// Set if less than immediate, unsigned.
    Sltiu,
    /// Store byte.
    Sb,
    /// Store halfword.
    Sh,
    /// Store word.
    Sw,
    /// Load byte, sign-extended.
    Lb,
    /// Load halfword, sign-extended.
    Lh,
    /// Load word, sign-extended.
    Lw,
    /// Load byte, zero-extended.
    Lbu,
    /// Load halfword, zero-extended.
    Lhu,
    /// Load word, zero-extended.
    Lwu,
    /// Load doubleword.
    Ld,
    /// Store doubleword.
    Sd,
    /// Branch if equal.
    Beq,
    /// Branch if not equal.
    Bne,
    /// Branch if less than, signed.
    Blt,
    /// Branch if greater or equal, signed.
    Bge,
    /// Branch if less than, unsigned.
    Bltu,
    /// Branch if greater or equal, unsigned.
    Bgeu,
    /// Add upper immediate to pc (`rd = pc + (imm << 12)`).
    Auipc,
    /// Jump and link (`rd = pc + 4; pc += imm`).
    Jal,
    /// Indirect jump and link (`rd = pc + 4; pc = (base + imm) & !1`).
    Jalr,
}

/// Operand shape of an instruction, dictated by its opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Destination and two source registers.
    Rrr,
    /// Destination-or-first-source register, a second register, and an
    /// immediate; branches reuse this shape with both registers as
    /// comparison operands.
    Rri,
    /// Destination register and an immediate.
    Ri,
    /// Register, signed offset, base register (`reg, offset(base)`).
    RegOffset,
    /// No operands (system call).
    NoOperand,
}

/// Handler category of an opcode; the mapping is total and exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Arithmetic/logical register operations and the system call.
    IntOp,
    /// Loads and stores.
    MemOp,
    /// Comparisons, branches, and jumps.
    ControlFlow,
}

impl Opcode {
    /// Every opcode, in mnemonic-table order.
    pub const ALL: [Self; 50] = [
        Self::Ecall,
        Self::Add,
        Self::Addw,
        Self::Addi,
        Self::Addiw,
        Self::Sub,
        Self::Subw,
        Self::Sll,
        Self::Sllw,
        Self::Srl,
        Self::Srlw,
        Self::Sra,
        Self::Sraw,
        Self::Slli,
        Self::Slliw,
        Self::Srli,
        Self::Srliw,
        Self::Srai,
        Self::Sraiw,
        Self::Or,
        Self::Ori,
        Self::And,
        Self::Andi,
        Self::Xor,
        Self::Xori,
        Self::Lui,
        Self::Slt,
        Self::Sltu,
        Self::Slti,
        Self::Sltiu,
        Self::Sb,
        Self::Sh,
        Self::Sw,
        Self::Lb,
        Self::Lh,
        Self::Lw,
        Self::Lbu,
        Self::Lhu,
        Self::Lwu,
        Self::Ld,
        Self::Sd,
        Self::Beq,
        Self::Bne,
        Self::Blt,
        Self::Bge,
        Self::Bltu,
        Self::Bgeu,
        Self::Auipc,
        Self::Jal,
        Self::Jalr,
    ];

    /// Assembly mnemonic, as written in program text.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Ecall => "ecall",
            Self::Add => "add",
            Self::Addw => "addw",
            Self::Addi => "addi",
            Self::Addiw => "addiw",
            Self::Sub => "sub",
            Self::Subw => "subw",
            Self::Sll => "sll",
            Self::Sllw => "sllw",
            Self::Srl => "srl",
            Self::Srlw => "srlw",
            Self::Sra => "sra",
            Self::Sraw => "sraw",
            Self::Slli => "slli",
            Self::Slliw => "slliw",
            Self::Srli => "srli",
            Self::Srliw => "srliw",
            Self::Srai => "srai",
            Self::Sraiw => "sraiw",
            Self::Or => "or",
            Self::Ori => "ori",
            Self::And => "and",
            Self::Andi => "andi",
            Self::Xor => "xor",
            Self::Xori => "xori",
            Self::Lui => "lui",
            Self::Slt => "slt",
            Self::Sltu => "sltu",
            Self::Slti => "slti",
            Self::Sltiu => "sltiu",
            Self::Sb => "sb",
            Self::Sh => "sh",
            Self::Sw => "sw",
            Self::Lb => "lb",
            Self::Lh => "lh",
            Self::Lw => "lw",
            Self::Lbu => "lbu",
            Self::Lhu => "lhu",
            Self::Lwu => "lwu",
            Self::Ld => "ld",
            Self::Sd => "sd",
            Self::Beq => "beq",
            Self::Bne => "bne",
            Self::Blt => "blt",
            Self::Bge => "bge",
            Self::Bltu => "bltu",
            Self::Bgeu => "bgeu",
            Self::Auipc => "auipc",
            Self::Jal => "jal",
            Self::Jalr => "jalr",
        }
    }

    /// Operand format this opcode carries.
    pub const fn format(self) -> Format {
        match self {
            Self::Ecall => Format::NoOperand,
            Self::Add
            | Self::Addw
            | Self::Sub
            | Self::Subw
            | Self::Sll
            | Self::Sllw
            | Self::Srl
            | Self::Srlw
            | Self::Sra
            | Self::Sraw
            | Self::Or
            | Self::And
            | Self::Xor
            | Self::Slt
            | Self::Sltu => Format::Rrr,
            Self::Addi
            | Self::Addiw
            | Self::Slli
            | Self::Slliw
            | Self::Srli
            | Self::Srliw
            | Self::Srai
            | Self::Sraiw
            | Self::Ori
            | Self::Andi
            | Self::Xori
            | Self::Slti
            | Self::Sltiu
            | Self::Beq
            | Self::Bne
            | Self::Blt
            | Self::Bge
            | Self::Bltu
            | Self::Bgeu => Format::Rri,
            Self::Lui | Self::Auipc | Self::Jal => Format::Ri,
            Self::Sb
            | Self::Sh
            | Self::Sw
            | Self::Sd
            | Self::Lb
            | Self::Lh
            | Self::Lw
            | Self::Lbu
            | Self::Lhu
            | Self::Lwu
            | Self::Ld
            | Self::Jalr => Format::RegOffset,
        }
    }

    /// Execution handler this opcode belongs to.
    pub const fn category(self) -> Category {
        match self {
            Self::Ecall
            | Self::Add
            | Self::Addw
            | Self::Addi
            | Self::Addiw
            | Self::Sub
            | Self::Subw
            | Self::Sll
            | Self::Sllw
            | Self::Srl
            | Self::Srlw
            | Self::Sra
            | Self::Sraw
            | Self::Slli
            | Self::Slliw
            | Self::Srli
            | Self::Srliw
            | Self::Srai
            | Self::Sraiw
            | Self::Or
            | Self::Ori
            | Self::And
            | Self::Andi
            | Self::Xor
            | Self::Xori
            | Self::Lui => Category::IntOp,
            Self::Sb
            | Self::Sh
            | Self::Sw
            | Self::Sd
            | Self::Lb
            | Self::Lh
            | Self::Lw
            | Self::Lbu
            | Self::Lhu
            | Self::Lwu
            | Self::Ld => Category::MemOp,
            Self::Slt
            | Self::Sltu
            | Self::Slti
            | Self::Sltiu
            | Self::Beq
            | Self::Bne
            | Self::Blt
            | Self::Bge
            | Self::Bltu
            | Self::Bgeu
            | Self::Auipc
            | Self::Jal
            | Self::Jalr => Category::ControlFlow,
        }
    }

    /// Looks an opcode up by its assembly mnemonic.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.mnemonic() == mnemonic)
    }
}

/// Operand payload of an instruction.
///
/// Exactly one variant is valid for a given opcode — the one matching
/// [`Opcode::format`]. Handlers treat a mismatched variant as an instruction
/// fault rather than guessing at fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operands {
    /// `rd, rs1, rs2`.
    Rrr {
        /// Destination register.
        rd: u8,
        /// First source register.
        rs1: u8,
        /// Second source register.
        rs2: u8,
    },
    /// `rd, rs1, imm` — branches compare `rd` and `rs1` and have no destination.
    Rri {
        /// Destination register, or the first comparison operand for branches.
        rd: u8,
        /// Source register, or the second comparison operand for branches.
        rs1: u8,
        /// Signed immediate.
        imm: i64,
    },
    /// `rd, imm`.
    Ri {
        /// Destination register.
        rd: u8,
        /// Signed immediate.
        imm: i64,
    },
    /// `reg, offset(base)` — `reg` is the store source or the load/jalr destination.
    RegOffset {
        /// Transferred (or link) register.
        reg: u8,
        /// Base address register.
        base: u8,
        /// Signed byte offset.
        offset: i64,
    },
    /// System-call form; the call number lives in `x17`, not in the encoding.
    NoOperand,
}

/// A single decoded instruction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Operation to perform.
    pub opcode: Opcode,
    /// Address of this instruction in the instruction window.
    pub addr: u64,
    /// Operand payload in the shape dictated by `opcode`.
    pub operands: Operands,
}

impl Instruction {
    /// Creates an instruction record.
    pub const fn new(opcode: Opcode, addr: u64, operands: Operands) -> Self {
        Self {
            opcode,
            addr,
            operands,
        }
    }
}

impl fmt::Display for Instruction {
    /// Renders the instruction in program-text form, without its address.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.opcode.mnemonic();
        match self.operands {
            Operands::Rrr { rd, rs1, rs2 } => write!(f, "{name} x{rd},x{rs1},x{rs2}"),
            Operands::Rri { rd, rs1, imm } => write!(f, "{name} x{rd},x{rs1},{imm}"),
            Operands::Ri { rd, imm } => write!(f, "{name} x{rd},{imm}"),
            Operands::RegOffset { reg, base, offset } => {
                write!(f, "{name} x{reg},{offset}(x{base})")
            }
            Operands::NoOperand => write!(f, "{name}"),
        }
    }
}
