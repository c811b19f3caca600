//! Instruction encoding to 32-bit words
//!
//! Every operand is range-checked before it is packed; nothing is silently
//! truncated.

use minirv_spec::encoding::*;
use minirv_spec::opcode::{funct3, funct7};
use minirv_spec::{Instruction, Opcode, Register};

use crate::error::EncodeError;

type Result<T> = std::result::Result<T, EncodeError>;

/// Encode instruction to a 32-bit word
pub fn encode(instr: &Instruction) -> Result<u32> {
    let mnemonic = instr.mnemonic();
    let word = match *instr {
        // ========== R-type (opcode = 0x33) ==========
        Instruction::Add { rd, rs1, rs2 } => encode_r(rd, funct3::ADD_SUB, rs1, rs2, funct7::BASE),
        Instruction::Sub { rd, rs1, rs2 } => encode_r(rd, funct3::ADD_SUB, rs1, rs2, funct7::ALT),
        Instruction::Sll { rd, rs1, rs2 } => encode_r(rd, funct3::SLL, rs1, rs2, funct7::BASE),
        Instruction::Xor { rd, rs1, rs2 } => encode_r(rd, funct3::XOR, rs1, rs2, funct7::BASE),
        Instruction::Srl { rd, rs1, rs2 } => encode_r(rd, funct3::SRL_SRA, rs1, rs2, funct7::BASE),
        Instruction::Sra { rd, rs1, rs2 } => encode_r(rd, funct3::SRL_SRA, rs1, rs2, funct7::ALT),
        Instruction::Or { rd, rs1, rs2 } => encode_r(rd, funct3::OR, rs1, rs2, funct7::BASE),
        Instruction::And { rd, rs1, rs2 } => encode_r(rd, funct3::AND, rs1, rs2, funct7::BASE),

        // ========== I-type (opcode = 0x13) ==========
        Instruction::Addi { rd, rs1, imm } => encode_i(Opcode::OpImm, rd, funct3::ADD_SUB, rs1, check_imm12(mnemonic, imm)?),
        Instruction::Xori { rd, rs1, imm } => encode_i(Opcode::OpImm, rd, funct3::XOR, rs1, check_imm12(mnemonic, imm)?),
        Instruction::Ori { rd, rs1, imm } => encode_i(Opcode::OpImm, rd, funct3::OR, rs1, check_imm12(mnemonic, imm)?),
        Instruction::Andi { rd, rs1, imm } => encode_i(Opcode::OpImm, rd, funct3::AND, rs1, check_imm12(mnemonic, imm)?),

        // Shifts keep funct7 in the upper bits of the immediate
        Instruction::Slli { rd, rs1, shamt } => {
            let shamt = check_shamt(mnemonic, shamt)?;
            encode_i(Opcode::OpImm, rd, funct3::SLL, rs1, shamt)
        }
        Instruction::Srli { rd, rs1, shamt } => {
            let shamt = check_shamt(mnemonic, shamt)?;
            encode_i(Opcode::OpImm, rd, funct3::SRL_SRA, rs1, shamt)
        }
        Instruction::Srai { rd, rs1, shamt } => {
            let shamt = check_shamt(mnemonic, shamt)?;
            encode_i(Opcode::OpImm, rd, funct3::SRL_SRA, rs1, ((funct7::ALT << 5) as i32) | shamt)
        }

        // ========== Memory ==========
        Instruction::Lw { rd, rs1, imm } => {
            encode_i(Opcode::Load, rd, funct3::WORD, rs1, check_imm12(mnemonic, imm)?)
        }
        Instruction::Sw { rs1, rs2, imm } => encode_stype(
            Opcode::Store,
            funct3::WORD,
            rs1.field(),
            rs2.field(),
            check_imm12(mnemonic, imm)?,
        ),

        // ========== Branch (opcode = 0x63) ==========
        Instruction::Beq { rs1, rs2, offset } => encode_b(mnemonic, funct3::BEQ, rs1, rs2, offset)?,
        Instruction::Bne { rs1, rs2, offset } => encode_b(mnemonic, funct3::BNE, rs1, rs2, offset)?,
        Instruction::Blt { rs1, rs2, offset } => encode_b(mnemonic, funct3::BLT, rs1, rs2, offset)?,
        Instruction::Bge { rs1, rs2, offset } => encode_b(mnemonic, funct3::BGE, rs1, rs2, offset)?,
        Instruction::Bltu { rs1, rs2, offset } => encode_b(mnemonic, funct3::BLTU, rs1, rs2, offset)?,
        Instruction::Bgeu { rs1, rs2, offset } => encode_b(mnemonic, funct3::BGEU, rs1, rs2, offset)?,

        // ========== Jump (opcode = 0x6F) ==========
        Instruction::Jal { rd, offset } => {
            check_offset(mnemonic, offset, JUMP_OFFSET_MIN, JUMP_OFFSET_MAX)?;
            encode_jtype(Opcode::Jal, rd.field(), offset)
        }

        // ========== System ==========
        Instruction::Halt => 0,
        Instruction::Print { rd } => encode_utype(Opcode::Print, rd.field()),
        Instruction::Input { rd } => encode_utype(Opcode::Input, rd.field()),
    };

    Ok(word)
}

fn encode_r(rd: Register, funct3: u32, rs1: Register, rs2: Register, funct7: u32) -> u32 {
    encode_rtype(Opcode::Op, rd.field(), funct3, rs1.field(), rs2.field(), funct7)
}

fn encode_i(opcode: Opcode, rd: Register, funct3: u32, rs1: Register, imm: i32) -> u32 {
    encode_itype(opcode, rd.field(), funct3, rs1.field(), imm)
}

fn encode_b(mnemonic: &'static str, funct3: u32, rs1: Register, rs2: Register, offset: i32) -> Result<u32> {
    check_offset(mnemonic, offset, BRANCH_OFFSET_MIN, BRANCH_OFFSET_MAX)?;
    Ok(encode_btype(Opcode::Branch, funct3, rs1.field(), rs2.field(), offset))
}

fn check_imm12(mnemonic: &'static str, imm: i32) -> Result<i32> {
    if fits_imm12(imm as i64) {
        Ok(imm)
    } else {
        Err(EncodeError::ImmediateOutOfRange {
            mnemonic,
            value: imm,
            min: IMM12_MIN,
            max: IMM12_MAX,
        })
    }
}

fn check_shamt(mnemonic: &'static str, shamt: u8) -> Result<i32> {
    let shamt = shamt as i32;
    if shamt <= SHAMT_MAX {
        Ok(shamt)
    } else {
        Err(EncodeError::ImmediateOutOfRange {
            mnemonic,
            value: shamt,
            min: 0,
            max: SHAMT_MAX,
        })
    }
}

fn check_offset(mnemonic: &'static str, offset: i32, min: i32, max: i32) -> Result<()> {
    if offset % 2 != 0 {
        return Err(EncodeError::MisalignedOffset { mnemonic, offset });
    }
    if offset < min || offset > max {
        return Err(EncodeError::OffsetOutOfRange { mnemonic, offset, min, max });
    }
    Ok(())
}
