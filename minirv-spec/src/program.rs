//! # Binary Program Image
//!
//! A program image is a flat sequence of 32-bit instruction words stored
//! little-endian, with no header:
//!
//! ```text
//! Offset  Size  Field
//! ──────────────────────────
//! 0x00    4     word 0 (loaded at address 0x0000)
//! 0x04    4     word 1
//! ...
//! ```

use crate::error::{Result, SpecError};
use crate::{MEMORY_SIZE, WORD_SIZE};

/// Assembled program
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    /// Instruction words in program order
    pub code: Vec<u32>,
}

impl Program {
    pub fn new(code: Vec<u32>) -> Self {
        Self { code }
    }

    /// Number of instruction words
    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Instruction words in program order
    pub fn words(&self) -> &[u32] {
        &self.code
    }

    /// Image size in bytes
    pub fn size_bytes(&self) -> usize {
        self.code.len() * WORD_SIZE as usize
    }

    /// Serialize to the little-endian image format
    pub fn to_bytes(&self) -> Vec<u8> {
        self.code.iter().flat_map(|word| word.to_le_bytes()).collect()
    }

    /// Parse an image. The length must be a multiple of 4 and fit in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % WORD_SIZE as usize != 0 {
            return Err(SpecError::UnalignedImage(bytes.len()));
        }
        if bytes.len() > MEMORY_SIZE {
            return Err(SpecError::ImageTooLarge {
                size: bytes.len(),
                max: MEMORY_SIZE,
            });
        }

        let code = bytes
            .chunks_exact(WORD_SIZE as usize)
            .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        Ok(Self { code })
    }
}
