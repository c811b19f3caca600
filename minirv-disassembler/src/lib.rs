//! # MiniRV Disassembler
//!
//! Decode MiniRV instruction words and render them as assembly text.
//!
//! [`decode`] is total over `u32`: every word is either an instruction or a
//! [`DisassemblerError`]. The runtime uses it as its instruction decoder.
//!
//! ## Example
//!
//! ```rust
//! use minirv_spec::Program;
//! use minirv_disassembler::{decode, disassemble};
//!
//! let program = Program::new(vec![0x0050_0093, 0x0000_008B, 0x0000_0000]);
//! println!("{}", disassemble(&program));
//!
//! assert_eq!(decode(0x0000_008B).unwrap().to_string(), "print x1");
//! ```

pub mod error;
pub mod decoder;
pub mod formatter;
pub mod disassembler;

pub use error::{DisassemblerError, Result};
pub use disassembler::{disassemble, to_source};
pub use decoder::decode;
pub use formatter::{format, format_at};
