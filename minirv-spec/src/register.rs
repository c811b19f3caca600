//! Register definitions for MiniRV
//!
//! Registers are named `x0`..`x31`. Unlike RISC-V, `x0` is not hardwired to
//! zero: it is an ordinary writable register.

use crate::error::SpecError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of registers
pub const NUM_REGISTERS: usize = 32;

/// Register (x0-x31)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Register {
    X0 = 0,
    X1 = 1,
    X2 = 2,
    X3 = 3,
    X4 = 4,
    X5 = 5,
    X6 = 6,
    X7 = 7,
    X8 = 8,
    X9 = 9,
    X10 = 10,
    X11 = 11,
    X12 = 12,
    X13 = 13,
    X14 = 14,
    X15 = 15,
    X16 = 16,
    X17 = 17,
    X18 = 18,
    X19 = 19,
    X20 = 20,
    X21 = 21,
    X22 = 22,
    X23 = 23,
    X24 = 24,
    X25 = 25,
    X26 = 26,
    X27 = 27,
    X28 = 28,
    X29 = 29,
    X30 = 30,
    X31 = 31,
}

impl Register {
    /// All registers in index order
    pub const ALL: [Register; NUM_REGISTERS] = [
        Self::X0, Self::X1, Self::X2, Self::X3, Self::X4, Self::X5, Self::X6, Self::X7,
        Self::X8, Self::X9, Self::X10, Self::X11, Self::X12, Self::X13, Self::X14, Self::X15,
        Self::X16, Self::X17, Self::X18, Self::X19, Self::X20, Self::X21, Self::X22, Self::X23,
        Self::X24, Self::X25, Self::X26, Self::X27, Self::X28, Self::X29, Self::X30, Self::X31,
    ];

    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Decode a 5-bit register field. Every 5-bit value names a register.
    #[inline]
    pub const fn from_field(field: u32) -> Self {
        Self::ALL[(field & 0x1F) as usize]
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Register number as it appears in an instruction field
    #[inline]
    pub const fn field(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for Register {
    type Error = SpecError;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        Self::from_index(index as usize).ok_or(SpecError::InvalidRegister(index))
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", *self as u8)
    }
}
