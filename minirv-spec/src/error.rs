//! # Error Types for the MiniRV specification crate

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpecError {
    #[error("Invalid register index: {0} (valid range: 0-31)")]
    InvalidRegister(u32),

    #[error("Invalid image size: {0} bytes is not a multiple of 4")]
    UnalignedImage(usize),

    #[error("Image too large: {size} bytes exceeds memory size of {max} bytes")]
    ImageTooLarge { size: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, SpecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SpecError::InvalidRegister(32);
        assert_eq!(err.to_string(), "Invalid register index: 32 (valid range: 0-31)");

        let err = SpecError::UnalignedImage(7);
        assert_eq!(err.to_string(), "Invalid image size: 7 bytes is not a multiple of 4");
    }
}
