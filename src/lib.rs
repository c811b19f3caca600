//! MiniRV toolchain
//!
//! Umbrella crate over the ISA definitions, assembler, disassembler and
//! runtime.

pub use minirv_assembler as assembler;
pub use minirv_disassembler as disassembler;
pub use minirv_runtime as runtime;
pub use minirv_spec as spec;

/// Assemble `source` and run it with scripted inputs
///
/// Returns the execution result and the lines printed by the program.
pub fn assemble_and_run(
    source: &str,
    inputs: Vec<i32>,
) -> Result<(runtime::ExecutionResult, Vec<String>), Box<dyn std::error::Error + Send + Sync>> {
    let program = assembler::assemble(source)?;
    Ok(runtime::run(&program, inputs)?)
}
