//! # Lexer for MiniRV Assembly Language
//!
//! Tokens are separated by whitespace, commas and parentheses, so
//! `lw x1, 8(x2)` lexes as `lw`, `x1`, `8`, `x2`. There is no comment
//! syntax: every other character belongs to a word.

use crate::error::{AssemblerError, LineError, Resource, Result};
use logos::Logos;

/// Tokens for MiniRV assembly
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f,()]+")]
pub enum Token<'a> {
    /// Mnemonic, register, immediate, label reference or label definition
    #[regex(r"[^ \t\r\n\f,()]+", |lex| lex.slice())]
    Word(&'a str),
}

/// One tokenized source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based line number
    pub number: usize,
    pub tokens: Vec<&'a str>,
}

impl<'a> SourceLine<'a> {
    /// Label defined on this line, with the trailing `:` stripped
    pub fn label(&self) -> Option<&'a str> {
        self.tokens.first().and_then(|token| token.strip_suffix(':'))
    }

    /// Mnemonic and operands of the instruction carried by this line
    pub fn statement(&self) -> Option<(&'a str, &[&'a str])> {
        let rest = if self.label().is_some() {
            &self.tokens[1..]
        } else {
            &self.tokens[..]
        };
        rest.split_first().map(|(mnemonic, operands)| (*mnemonic, operands))
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Split a single line into word tokens
pub fn tokenize(line: &str) -> std::result::Result<Vec<&str>, LineError> {
    Token::lexer(line)
        .map(|token| match token {
            Ok(Token::Word(word)) => Ok(word),
            Err(()) => Err(LineError::MalformedLine(line.trim().to_string())),
        })
        .collect()
}

/// Tokenize a whole source text, enforcing the line length limit
pub fn tokenize_source(source: &str, max_line_len: usize) -> Result<Vec<SourceLine<'_>>> {
    source
        .lines()
        .enumerate()
        .map(|(index, text)| {
            let number = index + 1;
            if text.len() > max_line_len {
                return Err(AssemblerError::CapacityExceeded {
                    line: number,
                    resource: Resource::LineLength,
                    limit: max_line_len,
                });
            }
            let tokens = tokenize(text).map_err(|kind| AssemblerError::Line { line: number, kind })?;
            Ok(SourceLine { number, tokens })
        })
        .collect()
}
