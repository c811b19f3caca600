//! MiniRV Instruction Set
//!
//! Decoded form of every instruction the machine understands. The
//! interpreter decodes a word once into this enum and matches on it
//! exhaustively.
//!
//! ## Instruction Formats
//! - R-type: `add sub sll xor srl sra or and`
//! - I-type: `addi xori ori andi slli srli srai lw`
//! - S-type: `sw`
//! - B-type: `beq bne blt bge bltu bgeu`
//! - J-type: `jal`
//! - U-type: `print input`
//! - `halt` is the all-zero word

use crate::register::Register;
use serde::{Deserialize, Serialize};

/// MiniRV Instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    // ========== Arithmetic ==========
    /// ADD: rd = rs1 + rs2
    Add { rd: Register, rs1: Register, rs2: Register },

    /// SUB: rd = rs1 - rs2
    Sub { rd: Register, rs1: Register, rs2: Register },

    /// ADDI: rd = rs1 + imm (sign-extended)
    Addi { rd: Register, rs1: Register, imm: i32 },

    // ========== Logical ==========
    /// AND: rd = rs1 & rs2
    And { rd: Register, rs1: Register, rs2: Register },

    /// OR: rd = rs1 | rs2
    Or { rd: Register, rs1: Register, rs2: Register },

    /// XOR: rd = rs1 ^ rs2
    Xor { rd: Register, rs1: Register, rs2: Register },

    /// ANDI: rd = rs1 & imm
    Andi { rd: Register, rs1: Register, imm: i32 },

    /// ORI: rd = rs1 | imm
    Ori { rd: Register, rs1: Register, imm: i32 },

    /// XORI: rd = rs1 ^ imm
    Xori { rd: Register, rs1: Register, imm: i32 },

    // ========== Shift ==========
    /// SLL: rd = rs1 << (rs2 & 0x1F)
    Sll { rd: Register, rs1: Register, rs2: Register },

    /// SRL: rd = rs1 >> (rs2 & 0x1F) (logical)
    Srl { rd: Register, rs1: Register, rs2: Register },

    /// SRA: rd = rs1 >> (rs2 & 0x1F) (arithmetic)
    Sra { rd: Register, rs1: Register, rs2: Register },

    /// SLLI: rd = rs1 << shamt
    Slli { rd: Register, rs1: Register, shamt: u8 },

    /// SRLI: rd = rs1 >> shamt (logical)
    Srli { rd: Register, rs1: Register, shamt: u8 },

    /// SRAI: rd = rs1 >> shamt (arithmetic)
    Srai { rd: Register, rs1: Register, shamt: u8 },

    // ========== Memory ==========
    /// LW: rd = mem[rs1 + imm] (4 bytes, big-endian)
    Lw { rd: Register, rs1: Register, imm: i32 },

    /// SW: mem[rs1 + imm] = rs2 (4 bytes, big-endian)
    Sw { rs1: Register, rs2: Register, imm: i32 },

    // ========== Branch ==========
    /// BEQ: if (rs1 == rs2) PC += offset
    Beq { rs1: Register, rs2: Register, offset: i32 },

    /// BNE: if (rs1 != rs2) PC += offset
    Bne { rs1: Register, rs2: Register, offset: i32 },

    /// BLT: if (rs1 < rs2) PC += offset (signed)
    Blt { rs1: Register, rs2: Register, offset: i32 },

    /// BGE: if (rs1 >= rs2) PC += offset (signed)
    Bge { rs1: Register, rs2: Register, offset: i32 },

    /// BLTU: if (rs1 < rs2) PC += offset (unsigned)
    Bltu { rs1: Register, rs2: Register, offset: i32 },

    /// BGEU: if (rs1 >= rs2) PC += offset (unsigned)
    Bgeu { rs1: Register, rs2: Register, offset: i32 },

    // ========== Jump ==========
    /// JAL: rd = PC + 4; PC += offset
    Jal { rd: Register, offset: i32 },

    // ========== System ==========
    /// HALT: stop execution
    Halt,

    /// PRINT: write `x<rd> = <value>` to the host
    Print { rd: Register },

    /// INPUT: block for a decimal value from the host into rd
    Input { rd: Register },
}

impl Instruction {
    /// Get instruction mnemonic
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::Add { .. } => "add",
            Instruction::Sub { .. } => "sub",
            Instruction::Addi { .. } => "addi",
            Instruction::And { .. } => "and",
            Instruction::Or { .. } => "or",
            Instruction::Xor { .. } => "xor",
            Instruction::Andi { .. } => "andi",
            Instruction::Ori { .. } => "ori",
            Instruction::Xori { .. } => "xori",
            Instruction::Sll { .. } => "sll",
            Instruction::Srl { .. } => "srl",
            Instruction::Sra { .. } => "sra",
            Instruction::Slli { .. } => "slli",
            Instruction::Srli { .. } => "srli",
            Instruction::Srai { .. } => "srai",
            Instruction::Lw { .. } => "lw",
            Instruction::Sw { .. } => "sw",
            Instruction::Beq { .. } => "beq",
            Instruction::Bne { .. } => "bne",
            Instruction::Blt { .. } => "blt",
            Instruction::Bge { .. } => "bge",
            Instruction::Bltu { .. } => "bltu",
            Instruction::Bgeu { .. } => "bgeu",
            Instruction::Jal { .. } => "jal",
            Instruction::Halt => "halt",
            Instruction::Print { .. } => "print",
            Instruction::Input { .. } => "input",
        }
    }

    /// PC-relative displacement of a branch or jump
    pub fn pc_offset(&self) -> Option<i32> {
        match self {
            Instruction::Beq { offset, .. }
            | Instruction::Bne { offset, .. }
            | Instruction::Blt { offset, .. }
            | Instruction::Bge { offset, .. }
            | Instruction::Bltu { offset, .. }
            | Instruction::Bgeu { offset, .. }
            | Instruction::Jal { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    /// Get destination register if present
    pub fn rd(&self) -> Option<Register> {
        match self {
            Instruction::Add { rd, .. }
            | Instruction::Sub { rd, .. }
            | Instruction::Addi { rd, .. }
            | Instruction::And { rd, .. }
            | Instruction::Or { rd, .. }
            | Instruction::Xor { rd, .. }
            | Instruction::Andi { rd, .. }
            | Instruction::Ori { rd, .. }
            | Instruction::Xori { rd, .. }
            | Instruction::Sll { rd, .. }
            | Instruction::Srl { rd, .. }
            | Instruction::Sra { rd, .. }
            | Instruction::Slli { rd, .. }
            | Instruction::Srli { rd, .. }
            | Instruction::Srai { rd, .. }
            | Instruction::Lw { rd, .. }
            | Instruction::Jal { rd, .. }
            | Instruction::Input { rd } => Some(*rd),
            _ => None,
        }
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // R-type
            Instruction::Add { rd, rs1, rs2 }
            | Instruction::Sub { rd, rs1, rs2 }
            | Instruction::And { rd, rs1, rs2 }
            | Instruction::Or { rd, rs1, rs2 }
            | Instruction::Xor { rd, rs1, rs2 }
            | Instruction::Sll { rd, rs1, rs2 }
            | Instruction::Srl { rd, rs1, rs2 }
            | Instruction::Sra { rd, rs1, rs2 } => {
                write!(f, "{} {}, {}, {}", self.mnemonic(), rd, rs1, rs2)
            }

            // I-type (immediate)
            Instruction::Addi { rd, rs1, imm }
            | Instruction::Andi { rd, rs1, imm }
            | Instruction::Ori { rd, rs1, imm }
            | Instruction::Xori { rd, rs1, imm } => {
                write!(f, "{} {}, {}, {}", self.mnemonic(), rd, rs1, imm)
            }

            // I-type (shift)
            Instruction::Slli { rd, rs1, shamt }
            | Instruction::Srli { rd, rs1, shamt }
            | Instruction::Srai { rd, rs1, shamt } => {
                write!(f, "{} {}, {}, {}", self.mnemonic(), rd, rs1, shamt)
            }

            Instruction::Lw { rd, rs1, imm } => {
                write!(f, "{} {}, {}({})", self.mnemonic(), rd, imm, rs1)
            }

            Instruction::Sw { rs1, rs2, imm } => {
                write!(f, "{} {}, {}({})", self.mnemonic(), rs2, imm, rs1)
            }

            // B-type (branch)
            Instruction::Beq { rs1, rs2, offset }
            | Instruction::Bne { rs1, rs2, offset }
            | Instruction::Blt { rs1, rs2, offset }
            | Instruction::Bge { rs1, rs2, offset }
            | Instruction::Bltu { rs1, rs2, offset }
            | Instruction::Bgeu { rs1, rs2, offset } => {
                write!(f, "{} {}, {}, {}", self.mnemonic(), rs1, rs2, offset)
            }

            Instruction::Jal { rd, offset } => {
                write!(f, "{} {}, {}", self.mnemonic(), rd, offset)
            }

            Instruction::Halt => write!(f, "halt"),
            Instruction::Print { rd } | Instruction::Input { rd } => {
                write!(f, "{} {}", self.mnemonic(), rd)
            }
        }
    }
}
