//! Operand parsing
//!
//! Turns a mnemonic and its operand tokens into an [`Instruction`]. Branch
//! and jump targets are resolved against the [`SymbolTable`] into offsets
//! relative to the instruction's own address.

use minirv_spec::{Instruction, Register};

use crate::error::LineError;
use crate::resolver::SymbolTable;

type Result<T> = std::result::Result<T, LineError>;

/// Parse one instruction located at `address`
pub fn parse_instruction(
    mnemonic: &str,
    operands: &[&str],
    address: u32,
    symbols: &SymbolTable,
) -> Result<Instruction> {
    let instr = match mnemonic {
        // ========== R-type ==========
        "add" | "sub" | "sll" | "xor" | "srl" | "sra" | "or" | "and" => {
            let [rd, rs1, rs2] = expect_operands::<3>(mnemonic, operands)?;
            let (rd, rs1, rs2) = (parse_register(rd)?, parse_register(rs1)?, parse_register(rs2)?);
            match mnemonic {
                "add" => Instruction::Add { rd, rs1, rs2 },
                "sub" => Instruction::Sub { rd, rs1, rs2 },
                "sll" => Instruction::Sll { rd, rs1, rs2 },
                "xor" => Instruction::Xor { rd, rs1, rs2 },
                "srl" => Instruction::Srl { rd, rs1, rs2 },
                "sra" => Instruction::Sra { rd, rs1, rs2 },
                "or" => Instruction::Or { rd, rs1, rs2 },
                _ => Instruction::And { rd, rs1, rs2 },
            }
        }

        // ========== I-type ==========
        "addi" | "xori" | "ori" | "andi" => {
            let [rd, rs1, imm] = expect_operands::<3>(mnemonic, operands)?;
            let (rd, rs1, imm) = (parse_register(rd)?, parse_register(rs1)?, parse_immediate(imm)?);
            match mnemonic {
                "addi" => Instruction::Addi { rd, rs1, imm },
                "xori" => Instruction::Xori { rd, rs1, imm },
                "ori" => Instruction::Ori { rd, rs1, imm },
                _ => Instruction::Andi { rd, rs1, imm },
            }
        }

        "slli" | "srli" | "srai" => {
            let [rd, rs1, shamt] = expect_operands::<3>(mnemonic, operands)?;
            let (rd, rs1, shamt) = (parse_register(rd)?, parse_register(rs1)?, parse_shamt(shamt)?);
            match mnemonic {
                "slli" => Instruction::Slli { rd, rs1, shamt },
                "srli" => Instruction::Srli { rd, rs1, shamt },
                _ => Instruction::Srai { rd, rs1, shamt },
            }
        }

        // ========== Memory ==========
        // lw rd, imm(rs1)
        "lw" => {
            let [rd, imm, rs1] = expect_operands::<3>(mnemonic, operands)?;
            Instruction::Lw {
                rd: parse_register(rd)?,
                rs1: parse_register(rs1)?,
                imm: parse_immediate(imm)?,
            }
        }

        // sw rs2, imm(rs1)
        "sw" => {
            let [rs2, imm, rs1] = expect_operands::<3>(mnemonic, operands)?;
            Instruction::Sw {
                rs1: parse_register(rs1)?,
                rs2: parse_register(rs2)?,
                imm: parse_immediate(imm)?,
            }
        }

        // ========== Branch ==========
        "beq" | "bne" | "blt" | "bge" | "bltu" | "bgeu" => {
            let [rs1, rs2, label] = expect_operands::<3>(mnemonic, operands)?;
            let rs1 = parse_register(rs1)?;
            let rs2 = parse_register(rs2)?;
            let offset = label_offset(label, address, symbols)?;
            match mnemonic {
                "beq" => Instruction::Beq { rs1, rs2, offset },
                "bne" => Instruction::Bne { rs1, rs2, offset },
                "blt" => Instruction::Blt { rs1, rs2, offset },
                "bge" => Instruction::Bge { rs1, rs2, offset },
                "bltu" => Instruction::Bltu { rs1, rs2, offset },
                _ => Instruction::Bgeu { rs1, rs2, offset },
            }
        }

        // ========== Jump ==========
        "jal" => {
            let [rd, label] = expect_operands::<2>(mnemonic, operands)?;
            Instruction::Jal {
                rd: parse_register(rd)?,
                offset: label_offset(label, address, symbols)?,
            }
        }

        // ========== System ==========
        "halt" => {
            let [] = expect_operands::<0>(mnemonic, operands)?;
            Instruction::Halt
        }
        "print" => {
            let [rd] = expect_operands::<1>(mnemonic, operands)?;
            Instruction::Print { rd: parse_register(rd)? }
        }
        "input" => {
            let [rd] = expect_operands::<1>(mnemonic, operands)?;
            Instruction::Input { rd: parse_register(rd)? }
        }

        _ => return Err(LineError::UnknownInstruction(mnemonic.to_string())),
    };

    Ok(instr)
}

/// Parse a register operand: `x<N>` or bare `N`, 0 <= N <= 31
pub fn parse_register(text: &str) -> Result<Register> {
    let digits = text.strip_prefix('x').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LineError::InvalidRegister(text.to_string()));
    }
    digits
        .parse::<u32>()
        .ok()
        .and_then(|index| Register::try_from(index).ok())
        .ok_or_else(|| LineError::InvalidRegister(text.to_string()))
}

/// Parse a decimal immediate, optionally negative
pub fn parse_immediate(text: &str) -> Result<i32> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LineError::InvalidImmediate(text.to_string()));
    }
    text.parse::<i32>()
        .map_err(|_| LineError::InvalidImmediate(text.to_string()))
}

/// Shift amounts are immediates limited to 0..=255 here; the encoder narrows
/// them further to 0..=31.
fn parse_shamt(text: &str) -> Result<u8> {
    let value = parse_immediate(text)?;
    u8::try_from(value).map_err(|_| LineError::InvalidImmediate(text.to_string()))
}

fn label_offset(label: &str, address: u32, symbols: &SymbolTable) -> Result<i32> {
    let target = symbols
        .get(label)
        .ok_or_else(|| LineError::UndefinedLabel(label.to_string()))?;
    Ok((target as i64 - address as i64) as i32)
}

fn expect_operands<'a, const N: usize>(mnemonic: &str, operands: &[&'a str]) -> Result<[&'a str; N]> {
    operands.try_into().map_err(|_| LineError::OperandCount {
        mnemonic: mnemonic.to_string(),
        expected: N,
        found: operands.len(),
    })
}
