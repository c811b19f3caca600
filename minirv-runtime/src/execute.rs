//! Instruction execution

use minirv_spec::encoding::SHAMT_MASK;
use minirv_spec::Instruction;

use crate::error::Result;
use crate::io::IoHandler;
use crate::state::{HaltReason, VMState};

/// Shift amount taken from a register operand
#[inline]
fn shamt(value: u32) -> u32 {
    value & SHAMT_MASK
}

#[inline]
fn branch(state: &mut VMState, taken: bool, offset: i32) {
    if taken {
        state.pc = state.pc.wrapping_add(offset as u32);
    } else {
        state.pc = state.pc.wrapping_add(4);
    }
}

/// Execute single instruction
///
/// On error the state is unchanged except for registers already written by
/// this instruction; the caller decides how to halt.
pub fn execute<IO: IoHandler + ?Sized>(
    instr: &Instruction,
    state: &mut VMState,
    io: &mut IO,
) -> Result<()> {
    match *instr {
        // ========== R-type ==========
        Instruction::Add { rd, rs1, rs2 } => {
            let result = state.read_reg(rs1).wrapping_add(state.read_reg(rs2));
            state.write_reg(rd, result);
            state.pc = state.pc.wrapping_add(4);
        }

        Instruction::Sub { rd, rs1, rs2 } => {
            let result = state.read_reg(rs1).wrapping_sub(state.read_reg(rs2));
            state.write_reg(rd, result);
            state.pc = state.pc.wrapping_add(4);
        }

        Instruction::And { rd, rs1, rs2 } => {
            let result = state.read_reg(rs1) & state.read_reg(rs2);
            state.write_reg(rd, result);
            state.pc = state.pc.wrapping_add(4);
        }

        Instruction::Or { rd, rs1, rs2 } => {
            let result = state.read_reg(rs1) | state.read_reg(rs2);
            state.write_reg(rd, result);
            state.pc = state.pc.wrapping_add(4);
        }

        Instruction::Xor { rd, rs1, rs2 } => {
            let result = state.read_reg(rs1) ^ state.read_reg(rs2);
            state.write_reg(rd, result);
            state.pc = state.pc.wrapping_add(4);
        }

        Instruction::Sll { rd, rs1, rs2 } => {
            let result = state.read_reg(rs1) << shamt(state.read_reg(rs2));
            state.write_reg(rd, result);
            state.pc = state.pc.wrapping_add(4);
        }

        Instruction::Srl { rd, rs1, rs2 } => {
            let result = state.read_reg(rs1) >> shamt(state.read_reg(rs2));
            state.write_reg(rd, result);
            state.pc = state.pc.wrapping_add(4);
        }

        Instruction::Sra { rd, rs1, rs2 } => {
            let result = (state.read_reg(rs1) as i32) >> shamt(state.read_reg(rs2));
            state.write_reg(rd, result as u32);
            state.pc = state.pc.wrapping_add(4);
        }

        // ========== I-type ==========
        Instruction::Addi { rd, rs1, imm } => {
            let result = state.read_reg(rs1).wrapping_add(imm as u32);
            state.write_reg(rd, result);
            state.pc = state.pc.wrapping_add(4);
        }

        Instruction::Andi { rd, rs1, imm } => {
            let result = state.read_reg(rs1) & imm as u32;
            state.write_reg(rd, result);
            state.pc = state.pc.wrapping_add(4);
        }

        Instruction::Ori { rd, rs1, imm } => {
            let result = state.read_reg(rs1) | imm as u32;
            state.write_reg(rd, result);
            state.pc = state.pc.wrapping_add(4);
        }

        Instruction::Xori { rd, rs1, imm } => {
            let result = state.read_reg(rs1) ^ imm as u32;
            state.write_reg(rd, result);
            state.pc = state.pc.wrapping_add(4);
        }

        Instruction::Slli { rd, rs1, shamt: amount } => {
            let result = state.read_reg(rs1) << shamt(amount as u32);
            state.write_reg(rd, result);
            state.pc = state.pc.wrapping_add(4);
        }

        Instruction::Srli { rd, rs1, shamt: amount } => {
            let result = state.read_reg(rs1) >> shamt(amount as u32);
            state.write_reg(rd, result);
            state.pc = state.pc.wrapping_add(4);
        }

        Instruction::Srai { rd, rs1, shamt: amount } => {
            let result = (state.read_reg(rs1) as i32) >> shamt(amount as u32);
            state.write_reg(rd, result as u32);
            state.pc = state.pc.wrapping_add(4);
        }

        // ========== Memory ==========
        Instruction::Lw { rd, rs1, imm } => {
            let addr = state.read_reg(rs1).wrapping_add(imm as u32);
            let value = state.memory.load_word(addr)?;
            state.write_reg(rd, value);
            state.pc = state.pc.wrapping_add(4);
        }

        Instruction::Sw { rs1, rs2, imm } => {
            let addr = state.read_reg(rs1).wrapping_add(imm as u32);
            let value = state.read_reg(rs2);
            state.memory.store_word(addr, value)?;
            state.pc = state.pc.wrapping_add(4);
        }

        // ========== Branches ==========
        Instruction::Beq { rs1, rs2, offset } => {
            let taken = state.read_reg(rs1) == state.read_reg(rs2);
            branch(state, taken, offset);
        }

        Instruction::Bne { rs1, rs2, offset } => {
            let taken = state.read_reg(rs1) != state.read_reg(rs2);
            branch(state, taken, offset);
        }

        Instruction::Blt { rs1, rs2, offset } => {
            let taken = (state.read_reg(rs1) as i32) < (state.read_reg(rs2) as i32);
            branch(state, taken, offset);
        }

        Instruction::Bge { rs1, rs2, offset } => {
            let taken = (state.read_reg(rs1) as i32) >= (state.read_reg(rs2) as i32);
            branch(state, taken, offset);
        }

        Instruction::Bltu { rs1, rs2, offset } => {
            let taken = state.read_reg(rs1) < state.read_reg(rs2);
            branch(state, taken, offset);
        }

        Instruction::Bgeu { rs1, rs2, offset } => {
            let taken = state.read_reg(rs1) >= state.read_reg(rs2);
            branch(state, taken, offset);
        }

        // ========== Jump ==========
        Instruction::Jal { rd, offset } => {
            let link = state.pc.wrapping_add(4);
            state.write_reg(rd, link);
            state.pc = state.pc.wrapping_add(offset as u32);
        }

        // ========== System ==========
        Instruction::Halt => {
            state.halt(HaltReason::Halt);
        }

        Instruction::Print { rd } => {
            io.print(rd, state.read_reg(rd) as i32)?;
            state.pc = state.pc.wrapping_add(4);
        }

        Instruction::Input { rd } => {
            let value = io.input(rd)?;
            state.write_reg(rd, value as u32);
            state.pc = state.pc.wrapping_add(4);
        }
    }

    Ok(())
}
