//! Disassembler errors

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DisassemblerError {
    #[error("Invalid instruction encoding: 0x{0:08X}")]
    InvalidEncoding(u32),

    #[error("Unknown opcode: 0x{0:02X}")]
    UnknownOpcode(u8),

    #[error("Branch at 0x{address:04X} targets unlabelable offset {offset}")]
    UnrepresentableTarget { address: u32, offset: i32 },
}

pub type Result<T> = std::result::Result<T, DisassemblerError>;
