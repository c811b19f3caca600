//! VM state

use minirv_spec::{Register, NUM_REGISTERS};
use serde::{Deserialize, Serialize};

use crate::error::{Fault, Result};
use crate::memory::Memory;

/// Why the machine stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HaltReason {
    /// `halt` instruction (the zero word)
    Halt,
    /// Opcode with no assigned instruction
    UnknownOpcode { pc: u32, opcode: u8 },
    /// Known opcode with unassigned function bits
    InvalidInstruction { pc: u32, word: u32 },
    /// Memory, fetch or host I/O failure
    Fault { pc: u32, error: Fault },
    /// Configured cycle budget spent
    CycleLimit,
}

impl HaltReason {
    /// True only for the `halt` instruction
    pub fn is_normal(&self) -> bool {
        matches!(self, HaltReason::Halt)
    }
}

impl std::fmt::Display for HaltReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HaltReason::Halt => write!(f, "halt"),
            HaltReason::UnknownOpcode { pc, opcode } => {
                write!(f, "unknown opcode 0x{:02X} at pc 0x{:04X}", opcode, pc)
            }
            HaltReason::InvalidInstruction { pc, word } => {
                write!(f, "invalid instruction 0x{:08X} at pc 0x{:04X}", word, pc)
            }
            HaltReason::Fault { pc, error } => write!(f, "fault at pc 0x{:04X}: {}", pc, error),
            HaltReason::CycleLimit => write!(f, "cycle limit reached"),
        }
    }
}

/// VM state
#[derive(Debug, Clone)]
pub struct VMState {
    /// Integer registers (x0-x31, all writable)
    pub registers: [u32; NUM_REGISTERS],

    /// Program counter
    pub pc: u32,

    /// Cleared when the machine halts
    pub running: bool,

    pub memory: Memory,

    /// Instructions retired since reset
    pub cycles: u64,

    pub halt_reason: Option<HaltReason>,
}

impl VMState {
    pub fn new() -> Self {
        VMState {
            registers: [0; NUM_REGISTERS],
            pc: 0,
            running: true,
            memory: Memory::new(),
            cycles: 0,
            halt_reason: None,
        }
    }

    /// Zero registers and memory, set pc to 0 and resume running
    pub fn reset(&mut self) {
        self.registers = [0; NUM_REGISTERS];
        self.pc = 0;
        self.running = true;
        self.memory.clear();
        self.cycles = 0;
        self.halt_reason = None;
    }

    /// Copy a program image to address 0
    pub fn load(&mut self, image: &[u8]) -> Result<()> {
        self.memory.load(image)
    }

    #[inline]
    pub fn read_reg(&self, reg: Register) -> u32 {
        self.registers[reg.index()]
    }

    /// Write register; x0 is an ordinary register
    #[inline]
    pub fn write_reg(&mut self, reg: Register, value: u32) {
        self.registers[reg.index()] = value;
    }

    /// Halt execution
    pub fn halt(&mut self, reason: HaltReason) {
        self.running = false;
        self.halt_reason = Some(reason);
    }
}

impl Default for VMState {
    fn default() -> Self {
        Self::new()
    }
}
