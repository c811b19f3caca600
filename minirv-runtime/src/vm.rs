//! Virtual Machine

use minirv_disassembler::{decode, DisassemblerError};
use minirv_spec::{Program, NUM_REGISTERS, WORD_SIZE};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{Fault, Result, RuntimeError};
use crate::execute::execute;
use crate::io::IoHandler;
use crate::state::{HaltReason, VMState};

/// VM configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VMConfig {
    /// Maximum number of cycles before halting
    pub max_cycles: u64,

    /// Emit a `trace!` event for every executed instruction
    pub trace: bool,
}

impl Default for VMConfig {
    fn default() -> Self {
        Self {
            max_cycles: 10_000_000,
            trace: false,
        }
    }
}

/// Execution result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Number of cycles executed
    pub cycles: u64,

    /// Reason for halting
    pub halt_reason: HaltReason,

    /// Program counter at halt
    pub pc: u32,

    /// Final register file
    pub registers: [u32; NUM_REGISTERS],
}

/// MiniRV Virtual Machine
pub struct VM<IO> {
    state: VMState,
    io: IO,
    config: VMConfig,
}

impl<IO: IoHandler> VM<IO> {
    /// Create a VM with `program` loaded at address 0
    pub fn new(program: &Program, io: IO, config: VMConfig) -> Result<Self> {
        Self::from_image(&program.to_bytes(), io, config)
    }

    /// Create a VM from a raw image
    pub fn from_image(image: &[u8], io: IO, config: VMConfig) -> Result<Self> {
        let mut state = VMState::new();
        state.load(image)?;
        debug!(bytes = image.len(), "image loaded");
        Ok(Self { state, io, config })
    }

    /// Execute one instruction
    ///
    /// Returns `false` once the machine has halted. Every failure is folded
    /// into a [`HaltReason`]; this never panics on guest behaviour.
    pub fn step(&mut self) -> bool {
        if !self.state.running {
            return false;
        }

        if self.state.cycles >= self.config.max_cycles {
            self.stop(HaltReason::CycleLimit);
            return false;
        }

        let pc = self.state.pc;

        let word = match self.fetch(pc) {
            Ok(word) => word,
            Err(e) => {
                self.fault(pc, e);
                return false;
            }
        };

        let instr = match decode(word) {
            Ok(instr) => instr,
            Err(DisassemblerError::UnknownOpcode(opcode)) => {
                warn!(pc, opcode, "unknown opcode");
                self.stop(HaltReason::UnknownOpcode { pc, opcode });
                return false;
            }
            Err(e) => {
                warn!(pc, word, error = %e, "invalid instruction");
                self.stop(HaltReason::InvalidInstruction { pc, word });
                return false;
            }
        };

        if self.config.trace {
            trace!(
                cycle = self.state.cycles,
                pc = format_args!("{:#06x}", pc),
                word = format_args!("{:08x}", word),
                "{}",
                instr
            );
        }

        if let Err(e) = execute(&instr, &mut self.state, &mut self.io) {
            self.fault(pc, e);
            return false;
        }

        self.state.cycles += 1;

        if !self.state.running {
            debug!(pc, cycles = self.state.cycles, "halted");
        }
        self.state.running
    }

    /// Run until the machine halts
    pub fn run(&mut self) -> ExecutionResult {
        while self.step() {}

        ExecutionResult {
            cycles: self.state.cycles,
            halt_reason: self
                .state
                .halt_reason
                .clone()
                .unwrap_or(HaltReason::Halt),
            pc: self.state.pc,
            registers: self.state.registers,
        }
    }

    /// Zero the machine and load a new image
    pub fn reload(&mut self, image: &[u8]) -> Result<()> {
        self.state.reset();
        self.state.load(image)
    }

    pub fn state(&self) -> &VMState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut VMState {
        &mut self.state
    }

    pub fn io(&self) -> &IO {
        &self.io
    }

    pub fn into_io(self) -> IO {
        self.io
    }

    fn fetch(&self, pc: u32) -> Result<u32> {
        if pc % WORD_SIZE != 0 {
            return Err(RuntimeError::MisalignedFetch { pc });
        }
        self.state.memory.fetch(pc)
    }

    fn fault(&mut self, pc: u32, error: RuntimeError) {
        warn!(pc, %error, "fault");
        self.stop(HaltReason::Fault {
            pc,
            error: Fault::from(error),
        });
    }

    fn stop(&mut self, reason: HaltReason) {
        debug!(pc = self.state.pc, cycles = self.state.cycles, %reason, "halted");
        self.state.halt(reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::BufferedIo;
    use minirv_assembler::assemble;
    use minirv_spec::Register;

    fn run_source(source: &str, inputs: Vec<i32>) -> (ExecutionResult, BufferedIo) {
        let program = assemble(source).unwrap();
        let mut vm = VM::new(&program, BufferedIo::new(inputs), VMConfig::default()).unwrap();
        let result = vm.run();
        (result, vm.into_io())
    }

    #[test]
    fn test_vm_basic_execution() {
        let (result, io) = run_source("addi x1, x0, 5\nprint x1\nhalt", vec![]);

        assert_eq!(result.halt_reason, HaltReason::Halt);
        assert_eq!(result.cycles, 3);
        assert_eq!(result.pc, 8);
        assert_eq!(result.registers[1], 5);
        assert_eq!(io.outputs(), &["x1 = 5".to_string()]);
    }

    #[test]
    fn test_empty_image_halts_on_zero_word() {
        let mut vm = VM::new(&Program::default(), BufferedIo::default(), VMConfig::default()).unwrap();
        let result = vm.run();
        assert_eq!(result.halt_reason, HaltReason::Halt);
        assert_eq!(result.pc, 0);
    }

    #[test]
    fn test_unknown_opcode() {
        let program = Program::new(vec![0x0050_0093, 0x0000_007F]);
        let mut vm = VM::new(&program, BufferedIo::default(), VMConfig::default()).unwrap();
        let result = vm.run();
        assert_eq!(result.halt_reason, HaltReason::UnknownOpcode { pc: 4, opcode: 0x7F });
        assert_eq!(result.cycles, 1);
        assert!(!vm.state().running);
    }

    #[test]
    fn test_invalid_instruction() {
        let program = Program::new(vec![0x0000_2033]);
        let mut vm = VM::new(&program, BufferedIo::default(), VMConfig::default()).unwrap();
        assert_eq!(
            vm.run().halt_reason,
            HaltReason::InvalidInstruction { pc: 0, word: 0x0000_2033 }
        );
    }

    #[test]
    fn test_cycle_limit() {
        let config = VMConfig { max_cycles: 100, ..VMConfig::default() };
        let program = assemble("spin: beq x0, x0, spin").unwrap();
        let mut vm = VM::new(&program, BufferedIo::default(), config).unwrap();
        let result = vm.run();
        assert_eq!(result.halt_reason, HaltReason::CycleLimit);
        assert_eq!(result.cycles, 100);
    }

    #[test]
    fn test_fault_on_out_of_bounds_load() {
        let (result, _) = run_source("addi x1, x0, -1\nlw x2, 0(x1)\nhalt", vec![]);
        assert!(matches!(result.halt_reason, HaltReason::Fault { pc: 4, .. }));
        assert_eq!(result.pc, 4);
    }

    #[test]
    fn test_fault_on_input_exhausted() {
        let (result, _) = run_source("input x1\nhalt", vec![]);
        assert_eq!(
            result.halt_reason,
            HaltReason::Fault { pc: 0, error: Fault::InputExhausted }
        );
    }

    #[test]
    fn test_misaligned_fetch() {
        let mut vm = VM::new(&Program::default(), BufferedIo::default(), VMConfig::default()).unwrap();
        vm.state_mut().pc = 2;
        let result = vm.run();
        assert_eq!(
            result.halt_reason,
            HaltReason::Fault { pc: 2, error: Fault::MisalignedFetch { pc: 2 } }
        );
    }

    #[test]
    fn test_pc_past_end_of_memory() {
        let mut vm = VM::new(&Program::default(), BufferedIo::default(), VMConfig::default()).unwrap();
        vm.state_mut().pc = 0x10000;
        assert_eq!(
            vm.run().halt_reason,
            HaltReason::Fault { pc: 0x10000, error: Fault::OutOfBounds { address: 0x10000 } }
        );
    }

    #[test]
    fn test_step_after_halt() {
        let mut vm = VM::new(&Program::new(vec![0]), BufferedIo::default(), VMConfig::default()).unwrap();
        assert!(!vm.step());
        assert!(!vm.step());
        assert_eq!(vm.state().cycles, 1);
    }

    #[test]
    fn test_reload() {
        let first = assemble("addi x1, x0, 1\nhalt").unwrap();
        let second = assemble("addi x2, x0, 2\nhalt").unwrap();
        let mut vm = VM::new(&first, BufferedIo::default(), VMConfig::default()).unwrap();
        vm.run();

        vm.reload(&second.to_bytes()).unwrap();
        let result = vm.run();
        assert_eq!(result.registers[1], 0);
        assert_eq!(result.registers[Register::X2.index()], 2);
    }

    #[test]
    fn test_image_too_large() {
        let image = vec![0u8; minirv_spec::MEMORY_SIZE + 1];
        assert!(matches!(
            VM::from_image(&image, BufferedIo::default(), VMConfig::default()),
            Err(RuntimeError::ImageTooLarge { .. })
        ));
    }
}
