//! Runtime error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Memory out of bounds: address {address:#06x}")]
    OutOfBounds { address: u32 },

    #[error("Misaligned fetch: pc {pc:#06x}")]
    MisalignedFetch { pc: u32 },

    #[error("Image too large: {size} bytes (max {max})")]
    ImageTooLarge { size: usize, max: usize },

    #[error("Invalid input: {0:?} is not a decimal integer")]
    InvalidInput(String),

    #[error("Input exhausted")]
    InputExhausted,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Failure recorded in [`HaltReason::Fault`](crate::HaltReason::Fault)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum Fault {
    #[error("Memory out of bounds: address {address:#06x}")]
    OutOfBounds { address: u32 },

    #[error("Misaligned fetch: pc {pc:#06x}")]
    MisalignedFetch { pc: u32 },

    #[error("Invalid input: {0:?} is not a decimal integer")]
    InvalidInput(String),

    #[error("Input exhausted")]
    InputExhausted,

    /// Host-side failure, kept as text
    #[error("{0}")]
    Host(String),
}

impl From<RuntimeError> for Fault {
    fn from(error: RuntimeError) -> Self {
        match error {
            RuntimeError::OutOfBounds { address } => Fault::OutOfBounds { address },
            RuntimeError::MisalignedFetch { pc } => Fault::MisalignedFetch { pc },
            RuntimeError::InvalidInput(line) => Fault::InvalidInput(line),
            RuntimeError::InputExhausted => Fault::InputExhausted,
            e @ (RuntimeError::ImageTooLarge { .. } | RuntimeError::Io(_)) => {
                Fault::Host(e.to_string())
            }
        }
    }
}
