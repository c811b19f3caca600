//! # MiniRV Opcode Definitions
//!
//! The major opcode occupies bits 6:0 of every instruction word. Operations
//! sharing a major opcode are told apart by `funct3` (bits 14:12) and, for
//! R-type and immediate shifts, `funct7` (bits 31:25).
//!
//! ## Opcode Map
//!
//! - 0x00: HALT (only the all-zero word is valid)
//! - 0x03: LOAD (LW)
//! - 0x0B: PRINT (host output)
//! - 0x0C: INPUT (host input)
//! - 0x13: OP-IMM (ADDI, XORI, ORI, ANDI, SLLI, SRLI, SRAI)
//! - 0x23: STORE (SW)
//! - 0x33: OP (ADD, SUB, SLL, XOR, SRL, SRA, OR, AND)
//! - 0x63: BRANCH (BEQ, BNE, BLT, BGE, BLTU, BGEU)
//! - 0x6F: JAL

use serde::{Deserialize, Serialize};

/// Major opcode (7 bits)
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    /// HALT: stop the machine
    Halt = 0x00,
    /// LW
    Load = 0x03,
    /// PRINT rd
    Print = 0x0B,
    /// INPUT rd
    Input = 0x0C,
    /// Register-immediate ALU operations
    OpImm = 0x13,
    /// SW
    Store = 0x23,
    /// Register-register ALU operations
    Op = 0x33,
    /// Conditional branches
    Branch = 0x63,
    /// JAL: rd = PC + 4; PC += offset
    Jal = 0x6F,
}

impl Opcode {
    /// Opcode width in bits
    pub const BITS: usize = 7;

    /// Opcode mask (0x7F for 7 bits)
    pub const MASK: u32 = 0x7F;

    /// Try to convert from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Opcode::Halt),
            0x03 => Some(Opcode::Load),
            0x0B => Some(Opcode::Print),
            0x0C => Some(Opcode::Input),
            0x13 => Some(Opcode::OpImm),
            0x23 => Some(Opcode::Store),
            0x33 => Some(Opcode::Op),
            0x63 => Some(Opcode::Branch),
            0x6F => Some(Opcode::Jal),
            _ => None,
        }
    }

    /// Convert to u8
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Extract opcode from 32-bit instruction word
    #[inline]
    pub fn from_instruction(instruction: u32) -> Option<Self> {
        Self::from_u8((instruction & Self::MASK) as u8)
    }
}

/// funct3 values
pub mod funct3 {
    // OP / OP-IMM
    pub const ADD_SUB: u32 = 0x0;
    pub const SLL: u32 = 0x1;
    pub const XOR: u32 = 0x4;
    pub const SRL_SRA: u32 = 0x5;
    pub const OR: u32 = 0x6;
    pub const AND: u32 = 0x7;

    // LOAD / STORE
    pub const WORD: u32 = 0x2;

    // BRANCH
    pub const BEQ: u32 = 0x0;
    pub const BNE: u32 = 0x1;
    pub const BLT: u32 = 0x4;
    pub const BGE: u32 = 0x5;
    pub const BLTU: u32 = 0x6;
    pub const BGEU: u32 = 0x7;
}

/// funct7 values
pub mod funct7 {
    pub const BASE: u32 = 0x00;
    /// Selects SUB over ADD and SRA/SRAI over SRL/SRLI
    pub const ALT: u32 = 0x20;
}
