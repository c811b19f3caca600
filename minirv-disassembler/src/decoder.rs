//! Instruction decoder
//!
//! Decoding is total: every 32-bit word yields either an [`Instruction`] or
//! one of two errors, `UnknownOpcode` for an unassigned major opcode and
//! `InvalidEncoding` for an assigned opcode with unassigned function bits.

use minirv_spec::encoding::*;
use minirv_spec::opcode::{funct3, funct7};
use minirv_spec::{Instruction, Opcode, Register};

use crate::error::{DisassemblerError, Result};

/// Decode 32-bit instruction word
pub fn decode(word: u32) -> Result<Instruction> {
    let opcode = extract_opcode(word) as u8;

    match Opcode::from_u8(opcode) {
        Some(Opcode::Halt) => decode_halt(word),
        Some(Opcode::Load) => decode_load(word),
        Some(Opcode::Print) => decode_host_io(word, |rd| Instruction::Print { rd }),
        Some(Opcode::Input) => decode_host_io(word, |rd| Instruction::Input { rd }),
        Some(Opcode::OpImm) => decode_i_type_alu(word),
        Some(Opcode::Store) => decode_s_type(word),
        Some(Opcode::Op) => decode_r_type(word),
        Some(Opcode::Branch) => decode_b_type(word),
        Some(Opcode::Jal) => Ok(Instruction::Jal {
            rd: rd(word),
            offset: extract_imm_j(word),
        }),
        None => Err(DisassemblerError::UnknownOpcode(opcode)),
    }
}

#[inline]
fn rd(word: u32) -> Register {
    Register::from_field(extract_rd(word))
}

#[inline]
fn rs1(word: u32) -> Register {
    Register::from_field(extract_rs1(word))
}

#[inline]
fn rs2(word: u32) -> Register {
    Register::from_field(extract_rs2(word))
}

fn decode_halt(word: u32) -> Result<Instruction> {
    if word == 0 {
        Ok(Instruction::Halt)
    } else {
        Err(DisassemblerError::InvalidEncoding(word))
    }
}

fn decode_host_io(word: u32, build: fn(Register) -> Instruction) -> Result<Instruction> {
    // Only opcode and rd may be set
    if word & !(OPCODE_MASK | (REGISTER_MASK << RD_SHIFT)) != 0 {
        return Err(DisassemblerError::InvalidEncoding(word));
    }
    Ok(build(rd(word)))
}

fn decode_load(word: u32) -> Result<Instruction> {
    match extract_funct3(word) {
        funct3::WORD => Ok(Instruction::Lw {
            rd: rd(word),
            rs1: rs1(word),
            imm: extract_imm_i(word),
        }),
        _ => Err(DisassemblerError::InvalidEncoding(word)),
    }
}

fn decode_s_type(word: u32) -> Result<Instruction> {
    match extract_funct3(word) {
        funct3::WORD => Ok(Instruction::Sw {
            rs1: rs1(word),
            rs2: rs2(word),
            imm: extract_imm_s(word),
        }),
        _ => Err(DisassemblerError::InvalidEncoding(word)),
    }
}

fn decode_r_type(word: u32) -> Result<Instruction> {
    let (rd, rs1, rs2) = (rd(word), rs1(word), rs2(word));

    match (extract_funct3(word), extract_funct7(word)) {
        (funct3::ADD_SUB, funct7::BASE) => Ok(Instruction::Add { rd, rs1, rs2 }),
        (funct3::ADD_SUB, funct7::ALT) => Ok(Instruction::Sub { rd, rs1, rs2 }),
        (funct3::SLL, funct7::BASE) => Ok(Instruction::Sll { rd, rs1, rs2 }),
        (funct3::XOR, funct7::BASE) => Ok(Instruction::Xor { rd, rs1, rs2 }),
        (funct3::SRL_SRA, funct7::BASE) => Ok(Instruction::Srl { rd, rs1, rs2 }),
        (funct3::SRL_SRA, funct7::ALT) => Ok(Instruction::Sra { rd, rs1, rs2 }),
        (funct3::OR, funct7::BASE) => Ok(Instruction::Or { rd, rs1, rs2 }),
        (funct3::AND, funct7::BASE) => Ok(Instruction::And { rd, rs1, rs2 }),
        _ => Err(DisassemblerError::InvalidEncoding(word)),
    }
}

fn decode_i_type_alu(word: u32) -> Result<Instruction> {
    let (rd, rs1) = (rd(word), rs1(word));
    let imm = extract_imm_i(word);
    let shamt = (extract_rs2(word) & SHAMT_MASK) as u8;

    match extract_funct3(word) {
        funct3::ADD_SUB => Ok(Instruction::Addi { rd, rs1, imm }),
        funct3::XOR => Ok(Instruction::Xori { rd, rs1, imm }),
        funct3::OR => Ok(Instruction::Ori { rd, rs1, imm }),
        funct3::AND => Ok(Instruction::Andi { rd, rs1, imm }),
        funct3::SLL if extract_funct7(word) == funct7::BASE => Ok(Instruction::Slli { rd, rs1, shamt }),
        funct3::SRL_SRA => match extract_funct7(word) {
            funct7::BASE => Ok(Instruction::Srli { rd, rs1, shamt }),
            funct7::ALT => Ok(Instruction::Srai { rd, rs1, shamt }),
            _ => Err(DisassemblerError::InvalidEncoding(word)),
        },
        _ => Err(DisassemblerError::InvalidEncoding(word)),
    }
}

fn decode_b_type(word: u32) -> Result<Instruction> {
    let (rs1, rs2) = (rs1(word), rs2(word));
    let offset = extract_imm_b(word);

    match extract_funct3(word) {
        funct3::BEQ => Ok(Instruction::Beq { rs1, rs2, offset }),
        funct3::BNE => Ok(Instruction::Bne { rs1, rs2, offset }),
        funct3::BLT => Ok(Instruction::Blt { rs1, rs2, offset }),
        funct3::BGE => Ok(Instruction::Bge { rs1, rs2, offset }),
        funct3::BLTU => Ok(Instruction::Bltu { rs1, rs2, offset }),
        funct3::BGEU => Ok(Instruction::Bgeu { rs1, rs2, offset }),
        _ => Err(DisassemblerError::InvalidEncoding(word)),
    }
}
