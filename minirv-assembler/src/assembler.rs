//! Main assembler logic
//!
//! Pass one ([`resolve`]) binds labels to addresses. Pass two parses and
//! encodes every instruction-bearing line, one word per line.

use minirv_spec::{Program, MEMORY_SIZE, WORD_SIZE};
use tracing::debug;

use crate::encoder::encode;
use crate::error::{AssemblerError, LineError, Resource, Result};
use crate::lexer::tokenize_source;
use crate::parser::parse_instruction;
use crate::resolver::resolve;

/// Assembler limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblerConfig {
    /// Maximum number of label definitions
    pub max_labels: usize,

    /// Maximum source line length in bytes
    pub max_line_len: usize,

    /// Maximum number of emitted instruction words
    pub max_words: usize,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            max_labels: 1024,
            max_line_len: 256,
            max_words: MEMORY_SIZE / WORD_SIZE as usize,
        }
    }
}

/// Assemble source code into a program using the default limits
pub fn assemble(source: &str) -> Result<Program> {
    assemble_with_config(source, &AssemblerConfig::default())
}

/// Assemble source code into a program
pub fn assemble_with_config(source: &str, config: &AssemblerConfig) -> Result<Program> {
    let lines = tokenize_source(source, config.max_line_len)?;
    let symbols = resolve(&lines, config.max_labels)?;
    debug!(labels = symbols.len(), "first pass complete");

    let mut code: Vec<u32> = Vec::new();

    for line in &lines {
        let Some((mnemonic, operands)) = line.statement() else {
            continue;
        };

        if code.len() >= config.max_words {
            return Err(AssemblerError::CapacityExceeded {
                line: line.number,
                resource: Resource::ProgramWords,
                limit: config.max_words,
            });
        }

        let address = code.len() as u32 * WORD_SIZE;
        let word = parse_instruction(mnemonic, operands, address, &symbols)
            .and_then(|instr| encode(&instr).map_err(LineError::from))
            .map_err(|kind| AssemblerError::Line { line: line.number, kind })?;

        code.push(word);
    }

    debug!(words = code.len(), "second pass complete");
    Ok(Program::new(code))
}
