//! First pass: label resolution
//!
//! Walks the tokenized lines once and binds every label to the byte address
//! of the next instruction. Only instruction-bearing lines advance the
//! address counter; a label alone on its line points at whatever follows.

use std::collections::HashMap;

use minirv_spec::WORD_SIZE;
use tracing::debug;

use crate::error::{AssemblerError, LineError, Resource, Result};
use crate::lexer::SourceLine;

/// Immutable label table produced by [`resolve`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    labels: HashMap<String, u32>,
}

impl SymbolTable {
    /// Address of a label (exact name match)
    pub fn get(&self, name: &str) -> Option<u32> {
        self.labels.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Build the symbol table for a tokenized program
pub fn resolve(lines: &[SourceLine<'_>], max_labels: usize) -> Result<SymbolTable> {
    let mut labels: HashMap<String, u32> = HashMap::new();
    let mut address: u32 = 0;

    for line in lines.iter().filter(|line| !line.is_empty()) {
        if let Some(name) = line.label() {
            if !is_identifier(name) {
                return Err(AssemblerError::Line {
                    line: line.number,
                    kind: LineError::MalformedLabel(line.tokens[0].to_string()),
                });
            }
            if labels.contains_key(name) {
                return Err(AssemblerError::Line {
                    line: line.number,
                    kind: LineError::DuplicateLabel(name.to_string()),
                });
            }
            let capacity_exceeded = AssemblerError::CapacityExceeded {
                line: line.number,
                resource: Resource::Labels,
                limit: max_labels,
            };
            if labels.len() >= max_labels {
                return Err(capacity_exceeded);
            }
            labels.try_reserve(1).map_err(|_| capacity_exceeded)?;

            debug!(label = name, address, "resolved label");
            labels.insert(name.to_string(), address);
        }

        if line.statement().is_some() {
            address = address.wrapping_add(WORD_SIZE);
        }
    }

    Ok(SymbolTable { labels })
}

/// `[A-Za-z_.][A-Za-z0-9_.]*`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '.' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}
