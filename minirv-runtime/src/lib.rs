//! # MiniRV Runtime
//!
//! Fetch-decode-execute interpreter for MiniRV images.
//!
//! - **32 registers**: x0-x31, all writable (x0 is not hardwired to zero)
//! - **64 KiB memory**: image loaded at address 0, execution starts at pc 0
//! - **Host I/O**: `print` / `input` go through an [`IoHandler`]
//!
//! Guest misbehaviour never panics the host: unknown opcodes, invalid
//! encodings, out-of-bounds accesses and I/O failures all end the run with a
//! [`HaltReason`].
//!
//! ## Example
//!
//! ```rust
//! use minirv_runtime::{BufferedIo, HaltReason, VMConfig, VM};
//! use minirv_spec::Program;
//!
//! // addi x1, x0, 5 ; print x1 ; halt
//! let program = Program::new(vec![0x0050_0093, 0x0000_008B, 0x0000_0000]);
//! let mut vm = VM::new(&program, BufferedIo::default(), VMConfig::default()).unwrap();
//! let result = vm.run();
//!
//! assert_eq!(result.halt_reason, HaltReason::Halt);
//! assert_eq!(vm.io().outputs(), &["x1 = 5".to_string()]);
//! ```

pub mod error;
pub mod state;
pub mod memory;
pub mod io;
pub mod execute;
pub mod vm;

pub use error::{Fault, Result, RuntimeError};
pub use state::{HaltReason, VMState};
pub use memory::Memory;
pub use io::{BufferedIo, IoHandler, StreamIo};
pub use execute::execute;
pub use vm::{ExecutionResult, VMConfig, VM};

/// Run a program with scripted inputs and return its printed lines
pub fn run(program: &minirv_spec::Program, inputs: Vec<i32>) -> Result<(ExecutionResult, Vec<String>)> {
    let mut vm = VM::new(program, BufferedIo::new(inputs), VMConfig::default())?;
    let result = vm.run();
    Ok((result, vm.into_io().outputs().to_vec()))
}
