//! # MiniRV Specification
//!
//! 32-bit register machine with a RISC-V flavoured instruction encoding.
//!
//! ## Key Features
//! - 32 general-purpose 32-bit registers (x0 is an ordinary register)
//! - 32-bit fixed-width instructions in R, I, S, B and J layouts
//! - 64 KiB flat byte-addressable memory
//! - Host I/O instructions (`print`, `input`) and an all-zero `halt` word
//!
//! This crate is the contract shared by the assembler and the interpreter:
//! both sides take field positions, opcodes and function codes from here.

pub mod register;
pub mod opcode;
pub mod encoding;
pub mod instruction;
pub mod error;
pub mod program;

pub use register::{Register, NUM_REGISTERS};
pub use opcode::Opcode;
pub use instruction::Instruction;
pub use error::SpecError;
pub use program::Program;

/// Size of the machine's flat memory in bytes (64 KiB)
pub const MEMORY_SIZE: usize = 0x10000;

/// Size of one instruction word in bytes
pub const WORD_SIZE: u32 = 4;
