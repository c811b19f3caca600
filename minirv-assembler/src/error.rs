//! Assembler errors

use std::fmt;
use thiserror::Error;

/// Errors reported by the assembler. Every error names the offending line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssemblerError {
    #[error("Error on line {line}: {kind}")]
    Line { line: usize, kind: LineError },

    #[error("Capacity exceeded on line {line}: {resource} limit is {limit}")]
    CapacityExceeded {
        line: usize,
        resource: Resource,
        limit: usize,
    },
}

impl AssemblerError {
    /// Line the error was reported on (1-based)
    pub fn line(&self) -> usize {
        match self {
            AssemblerError::Line { line, .. } | AssemblerError::CapacityExceeded { line, .. } => *line,
        }
    }
}

/// Problems with a single source line
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("Unknown instruction: {0}")]
    UnknownInstruction(String),

    #[error("{mnemonic} expects {expected} operand(s), found {found}")]
    OperandCount {
        mnemonic: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid register: {0}")]
    InvalidRegister(String),

    #[error("Invalid immediate value: {0}")]
    InvalidImmediate(String),

    #[error("Undefined label: {0}")]
    UndefinedLabel(String),

    #[error("Duplicate label: {0}")]
    DuplicateLabel(String),

    #[error("Malformed label definition: {0:?}")]
    MalformedLabel(String),

    #[error("Malformed line: {0}")]
    MalformedLine(String),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Operand values that cannot be packed into their instruction field
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("{mnemonic}: immediate {value} out of range {min}..={max}")]
    ImmediateOutOfRange {
        mnemonic: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },

    #[error("{mnemonic}: offset {offset} is not a multiple of 2")]
    MisalignedOffset { mnemonic: &'static str, offset: i32 },

    #[error("{mnemonic}: offset {offset} out of range {min}..={max}")]
    OffsetOutOfRange {
        mnemonic: &'static str,
        offset: i32,
        min: i32,
        max: i32,
    },
}

/// Bounded assembler resources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Labels,
    LineLength,
    ProgramWords,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Labels => write!(f, "label table"),
            Resource::LineLength => write!(f, "line length"),
            Resource::ProgramWords => write!(f, "program size (words)"),
        }
    }
}

pub type Result<T> = std::result::Result<T, AssemblerError>;
