//! Host I/O for `print` and `input`

use std::io::{BufRead, Write};

use minirv_spec::Register;

use crate::error::{Result, RuntimeError};

/// Host side of the `print` / `input` instructions
pub trait IoHandler {
    /// Emit `x<reg> = <value>`
    fn print(&mut self, reg: Register, value: i32) -> Result<()>;

    /// Prompt for and read one decimal integer destined for `reg`
    fn input(&mut self, reg: Register) -> Result<i32>;
}

/// Line-oriented I/O over any reader/writer pair
#[derive(Debug)]
pub struct StreamIo<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> StreamIo<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        StreamIo { reader, writer }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

impl StreamIo<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Process stdin / stdout
    pub fn stdio() -> Self {
        StreamIo::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> IoHandler for StreamIo<R, W> {
    fn print(&mut self, reg: Register, value: i32) -> Result<()> {
        writeln!(self.writer, "{} = {}", reg, value)?;
        self.writer.flush()?;
        Ok(())
    }

    fn input(&mut self, reg: Register) -> Result<i32> {
        write!(self.writer, "Enter a value for {}: ", reg)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(RuntimeError::InputExhausted);
        }

        let text = line.trim();
        text.parse::<i32>()
            .map_err(|_| RuntimeError::InvalidInput(text.to_string()))
    }
}

/// Scripted I/O: inputs come from a queue and printed lines are collected
#[derive(Debug, Clone, Default)]
pub struct BufferedIo {
    inputs: std::collections::VecDeque<i32>,
    outputs: Vec<String>,
}

impl BufferedIo {
    pub fn new(inputs: Vec<i32>) -> Self {
        BufferedIo {
            inputs: inputs.into(),
            outputs: Vec::new(),
        }
    }

    /// Lines produced by `print`, without trailing newlines
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }
}

impl IoHandler for BufferedIo {
    fn print(&mut self, reg: Register, value: i32) -> Result<()> {
        self.outputs.push(format!("{} = {}", reg, value));
        Ok(())
    }

    fn input(&mut self, _reg: Register) -> Result<i32> {
        self.inputs.pop_front().ok_or(RuntimeError::InputExhausted)
    }
}
