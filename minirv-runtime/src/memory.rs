//! Memory subsystem
//!
//! A flat, zero-initialised byte array of [`MEMORY_SIZE`] bytes. Instruction
//! fetch reads little-endian words; `lw`/`sw` data words are big-endian
//! (most significant byte at the lowest address). Data accesses need no
//! alignment but are always bounds-checked.

use minirv_spec::MEMORY_SIZE;

use crate::error::{Result, RuntimeError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    bytes: Vec<u8>,
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            bytes: vec![0; MEMORY_SIZE],
        }
    }

    /// Zero all bytes
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Copy an image to offset 0
    ///
    /// Memory is left untouched if the image does not fit. Bytes past the
    /// image keep their current value.
    pub fn load(&mut self, image: &[u8]) -> Result<()> {
        if image.len() > MEMORY_SIZE {
            return Err(RuntimeError::ImageTooLarge {
                size: image.len(),
                max: MEMORY_SIZE,
            });
        }
        self.bytes[..image.len()].copy_from_slice(image);
        Ok(())
    }

    /// Fetch an instruction word (little-endian)
    pub fn fetch(&self, pc: u32) -> Result<u32> {
        Ok(u32::from_le_bytes(self.word_bytes(pc)?))
    }

    /// Load a data word (big-endian)
    pub fn load_word(&self, addr: u32) -> Result<u32> {
        Ok(u32::from_be_bytes(self.word_bytes(addr)?))
    }

    /// Store a data word (big-endian)
    pub fn store_word(&mut self, addr: u32, value: u32) -> Result<()> {
        let range = Self::word_range(addr)?;
        self.bytes[range].copy_from_slice(&value.to_be_bytes());
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn word_bytes(&self, addr: u32) -> Result<[u8; 4]> {
        let range = Self::word_range(addr)?;
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.bytes[range]);
        Ok(word)
    }

    fn word_range(addr: u32) -> Result<std::ops::Range<usize>> {
        let start = addr as usize;
        match start.checked_add(4) {
            Some(end) if end <= MEMORY_SIZE => Ok(start..end),
            _ => Err(RuntimeError::OutOfBounds { address: addr }),
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
