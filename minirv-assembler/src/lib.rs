//! MiniRV Assembler
//!
//! Assemble MiniRV assembly language into a flat binary image.
//!
//! ## Example
//!
//! ```rust
//! use minirv_assembler::assemble;
//!
//! let source = r#"
//!     addi x1, x0, 5
//!     print x1
//!     halt
//! "#;
//!
//! let program = assemble(source).unwrap();
//! assert_eq!(program.code.len(), 3);
//! ```

pub mod error;
pub mod lexer;
pub mod resolver;
pub mod parser;
pub mod encoder;
pub mod assembler;

pub use error::{AssemblerError, EncodeError, LineError, Resource, Result};
pub use assembler::{assemble, assemble_with_config, AssemblerConfig};
pub use resolver::{resolve, SymbolTable};
pub use parser::{parse_instruction, parse_register};
pub use encoder::encode;
