//! # Instruction Encoding Constants and Helpers
//!
//! Field positions, masks and immediate packing shared by the assembler's
//! encoder and the interpreter's decoder.
//!
//! ## Instruction Formats (bit 31 on the left)
//!
//! ```text
//! R-type: [funct7:7][rs2:5][rs1:5][funct3:3][rd:5][opcode:7]
//! I-type: [imm[11:0]:12][rs1:5][funct3:3][rd:5][opcode:7]
//! S-type: [imm[11:5]:7][rs2:5][rs1:5][funct3:3][imm[4:0]:5][opcode:7]
//! B-type: [imm[12]:1][imm[10:5]:6][rs2:5][rs1:5][funct3:3][imm[4:1]:4][imm[11]:1][opcode:7]
//! J-type: [imm[20]:1][imm[10:1]:10][imm[11]:1][imm[19:12]:8][rd:5][opcode:7]
//! U-type: [0:20][rd:5][opcode:7]   (print / input)
//! ```

use crate::Opcode;

// ============================================================================
// Bit Position Constants
// ============================================================================

/// Destination register field: bits 7-11
pub const RD_SHIFT: u32 = 7;

/// funct3 field: bits 12-14
pub const FUNCT3_SHIFT: u32 = 12;

/// Source register 1 field: bits 15-19
pub const RS1_SHIFT: u32 = 15;

/// Source register 2 field: bits 20-24
pub const RS2_SHIFT: u32 = 20;

/// funct7 field: bits 25-31
pub const FUNCT7_SHIFT: u32 = 25;

/// I-type immediate: bits 20-31
pub const IMM_I_SHIFT: u32 = 20;

// ============================================================================
// Field Masks
// ============================================================================

/// Opcode mask (7 bits)
pub const OPCODE_MASK: u32 = 0x7F;

/// Register field mask (5 bits)
pub const REGISTER_MASK: u32 = 0x1F;

/// funct3 mask (3 bits)
pub const FUNCT3_MASK: u32 = 0x7;

/// funct7 mask (7 bits)
pub const FUNCT7_MASK: u32 = 0x7F;

/// 12-bit immediate mask
pub const IMM12_MASK: u32 = 0xFFF;

/// Shift amounts use the low 5 bits
pub const SHAMT_MASK: u32 = 0x1F;

// ============================================================================
// Immediate Ranges
// ============================================================================

/// Smallest I/S-type immediate
pub const IMM12_MIN: i32 = -2048;

/// Largest I/S-type immediate
pub const IMM12_MAX: i32 = 2047;

/// Largest shift amount for SLLI/SRLI/SRAI
pub const SHAMT_MAX: i32 = 31;

/// Smallest branch offset (13-bit signed, even)
pub const BRANCH_OFFSET_MIN: i32 = -4096;

/// Largest branch offset
pub const BRANCH_OFFSET_MAX: i32 = 4094;

/// Smallest jump offset (21-bit signed, even)
pub const JUMP_OFFSET_MIN: i32 = -(1 << 20);

/// Largest jump offset
pub const JUMP_OFFSET_MAX: i32 = (1 << 20) - 2;

// ============================================================================
// Field Extraction Functions
// ============================================================================

#[inline]
pub const fn extract_opcode(inst: u32) -> u32 {
    inst & OPCODE_MASK
}

#[inline]
pub const fn extract_rd(inst: u32) -> u32 {
    (inst >> RD_SHIFT) & REGISTER_MASK
}

#[inline]
pub const fn extract_funct3(inst: u32) -> u32 {
    (inst >> FUNCT3_SHIFT) & FUNCT3_MASK
}

#[inline]
pub const fn extract_rs1(inst: u32) -> u32 {
    (inst >> RS1_SHIFT) & REGISTER_MASK
}

#[inline]
pub const fn extract_rs2(inst: u32) -> u32 {
    (inst >> RS2_SHIFT) & REGISTER_MASK
}

#[inline]
pub const fn extract_funct7(inst: u32) -> u32 {
    (inst >> FUNCT7_SHIFT) & FUNCT7_MASK
}

/// I-type immediate, bits 31:20 sign-extended
#[inline]
pub const fn extract_imm_i(inst: u32) -> i32 {
    (inst as i32) >> IMM_I_SHIFT
}

/// S-type immediate, imm[11:5] from bits 31:25 and imm[4:0] from bits 11:7
#[inline]
pub const fn extract_imm_s(inst: u32) -> i32 {
    (((inst & 0xFE00_0000) as i32) >> 20) | ((inst >> 7) & 0x1F) as i32
}

/// B-type immediate (even byte offset)
#[inline]
pub const fn extract_imm_b(inst: u32) -> i32 {
    (((inst & 0x8000_0000) as i32) >> 19)
        | ((inst & 0x80) << 4) as i32
        | ((inst >> 20) & 0x7E0) as i32
        | ((inst >> 7) & 0x1E) as i32
}

/// J-type immediate (even byte offset)
#[inline]
pub const fn extract_imm_j(inst: u32) -> i32 {
    (((inst & 0x8000_0000) as i32) >> 11)
        | (inst & 0x000F_F000) as i32
        | ((inst >> 9) & 0x800) as i32
        | ((inst >> 20) & 0x7FE) as i32
}

// ============================================================================
// Instruction Encoding Functions
// ============================================================================

/// Encode R-type instruction
#[inline]
pub const fn encode_rtype(opcode: Opcode, rd: u32, funct3: u32, rs1: u32, rs2: u32, funct7: u32) -> u32 {
    (opcode.to_u8() as u32)
        | ((rd & REGISTER_MASK) << RD_SHIFT)
        | ((funct3 & FUNCT3_MASK) << FUNCT3_SHIFT)
        | ((rs1 & REGISTER_MASK) << RS1_SHIFT)
        | ((rs2 & REGISTER_MASK) << RS2_SHIFT)
        | ((funct7 & FUNCT7_MASK) << FUNCT7_SHIFT)
}

/// Encode I-type instruction. The immediate is truncated to 12 bits; callers
/// range-check it first.
#[inline]
pub const fn encode_itype(opcode: Opcode, rd: u32, funct3: u32, rs1: u32, imm: i32) -> u32 {
    (opcode.to_u8() as u32)
        | ((rd & REGISTER_MASK) << RD_SHIFT)
        | ((funct3 & FUNCT3_MASK) << FUNCT3_SHIFT)
        | ((rs1 & REGISTER_MASK) << RS1_SHIFT)
        | (((imm as u32) & IMM12_MASK) << IMM_I_SHIFT)
}

/// Encode S-type instruction (stores)
#[inline]
pub const fn encode_stype(opcode: Opcode, funct3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let imm = imm as u32;
    (opcode.to_u8() as u32)
        | ((imm & 0x1F) << 7)
        | ((funct3 & FUNCT3_MASK) << FUNCT3_SHIFT)
        | ((rs1 & REGISTER_MASK) << RS1_SHIFT)
        | ((rs2 & REGISTER_MASK) << RS2_SHIFT)
        | (((imm >> 5) & 0x7F) << 25)
}

/// Encode B-type instruction (branches)
#[inline]
pub const fn encode_btype(opcode: Opcode, funct3: u32, rs1: u32, rs2: u32, offset: i32) -> u32 {
    let imm = offset as u32;
    (opcode.to_u8() as u32)
        | (((imm >> 11) & 0x1) << 7)
        | (((imm >> 1) & 0xF) << 8)
        | ((funct3 & FUNCT3_MASK) << FUNCT3_SHIFT)
        | ((rs1 & REGISTER_MASK) << RS1_SHIFT)
        | ((rs2 & REGISTER_MASK) << RS2_SHIFT)
        | (((imm >> 5) & 0x3F) << 25)
        | (((imm >> 12) & 0x1) << 31)
}

/// Encode J-type instruction (jumps)
#[inline]
pub const fn encode_jtype(opcode: Opcode, rd: u32, offset: i32) -> u32 {
    let imm = offset as u32;
    (opcode.to_u8() as u32)
        | ((rd & REGISTER_MASK) << RD_SHIFT)
        | (imm & 0x000F_F000)
        | (((imm >> 11) & 0x1) << 20)
        | (((imm >> 1) & 0x3FF) << 21)
        | (((imm >> 20) & 0x1) << 31)
}

/// Encode an instruction that only carries a destination register
#[inline]
pub const fn encode_utype(opcode: Opcode, rd: u32) -> u32 {
    (opcode.to_u8() as u32) | ((rd & REGISTER_MASK) << RD_SHIFT)
}

// ============================================================================
// Range Checks
// ============================================================================

/// Value fits a signed 12-bit I/S immediate
#[inline]
pub const fn fits_imm12(value: i64) -> bool {
    value >= IMM12_MIN as i64 && value <= IMM12_MAX as i64
}

/// Offset is even and fits a 13-bit signed branch displacement
#[inline]
pub const fn fits_branch_offset(offset: i64) -> bool {
    offset % 2 == 0 && offset >= BRANCH_OFFSET_MIN as i64 && offset <= BRANCH_OFFSET_MAX as i64
}

/// Offset is even and fits a 21-bit signed jump displacement
#[inline]
pub const fn fits_jump_offset(offset: i64) -> bool {
    offset % 2 == 0 && offset >= JUMP_OFFSET_MIN as i64 && offset <= JUMP_OFFSET_MAX as i64
}
