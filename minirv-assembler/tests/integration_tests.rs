//! Integration tests for the MiniRV assembler
//!
//! Tests the complete assembly workflow including:
//! - Instruction parsing and encoding
//! - Label resolution and branch offsets
//! - Image layout

use minirv_assembler::{assemble, encode, parse_register, resolve, lexer::tokenize_source};
use minirv_spec::encoding::*;
use minirv_spec::{Instruction, Opcode, Register};

// ============================================================================
// Basic Assembly Tests
// ============================================================================

#[test]
fn test_assemble_empty_program() {
    let program = assemble("").unwrap();
    assert!(program.code.is_empty());
}

#[test]
fn test_assemble_blank_lines_only() {
    let program = assemble("\n   \n\t\n").unwrap();
    assert!(program.code.is_empty());
}

#[test]
fn test_assemble_labels_only() {
    let program = assemble("start:\nend:").unwrap();
    assert!(program.code.is_empty());
}

#[test]
fn test_assemble_multiple_instructions() {
    let source = r#"
        add x1, x2, x3
        sub x4, x5, x6
        halt
    "#;
    let program = assemble(source).unwrap();
    assert_eq!(program.code.len(), 3);
}

// ============================================================================
// Per-format Encoding
// ============================================================================

#[test]
fn test_assemble_all_r_type() {
    let source = r#"
        add x1, x2, x3
        sub x1, x2, x3
        sll x1, x2, x3
        xor x1, x2, x3
        srl x1, x2, x3
        sra x1, x2, x3
        or x1, x2, x3
        and x1, x2, x3
    "#;
    let program = assemble(source).unwrap();
    let expected = [(0, 0x00), (0, 0x20), (1, 0x00), (4, 0x00), (5, 0x00), (5, 0x20), (6, 0x00), (7, 0x00)];

    for (word, (funct3, funct7)) in program.code.iter().zip(expected) {
        assert_eq!(extract_opcode(*word), Opcode::Op.to_u8() as u32);
        assert_eq!(extract_rd(*word), 1);
        assert_eq!(extract_rs1(*word), 2);
        assert_eq!(extract_rs2(*word), 3);
        assert_eq!(extract_funct3(*word), funct3);
        assert_eq!(extract_funct7(*word), funct7);
    }
}

#[test]
fn test_assemble_all_i_type() {
    let source = r#"
        addi x1, x2, -7
        xori x1, x2, -7
        ori x1, x2, -7
        andi x1, x2, -7
    "#;
    let program = assemble(source).unwrap();
    let funct3s = [0, 4, 6, 7];

    for (word, funct3) in program.code.iter().zip(funct3s) {
        assert_eq!(extract_opcode(*word), Opcode::OpImm.to_u8() as u32);
        assert_eq!(extract_funct3(*word), funct3);
        assert_eq!(extract_imm_i(*word), -7);
    }
}

#[test]
fn test_assemble_shift_immediates() {
    let program = assemble("slli x1, x1, 31\nsrli x1, x1, 1\nsrai x1, x1, 4").unwrap();
    assert_eq!(extract_funct3(program.code[0]), 1);
    assert_eq!(extract_rs2(program.code[0]), 31);
    assert_eq!(extract_funct7(program.code[1]), 0x00);
    assert_eq!(extract_funct7(program.code[2]), 0x20);
    assert_eq!(extract_rs2(program.code[2]), 4);
}

#[test]
fn test_assemble_load_store() {
    let program = assemble("lw x5, -12(x2)\nsw x5, 2047(x2)").unwrap();

    let lw = program.code[0];
    assert_eq!(extract_opcode(lw), 0x03);
    assert_eq!(extract_funct3(lw), 0x2);
    assert_eq!(extract_rd(lw), 5);
    assert_eq!(extract_rs1(lw), 2);
    assert_eq!(extract_imm_i(lw), -12);

    let sw = program.code[1];
    assert_eq!(extract_opcode(sw), 0x23);
    assert_eq!(extract_funct3(sw), 0x2);
    assert_eq!(extract_rs1(sw), 2);
    assert_eq!(extract_rs2(sw), 5);
    assert_eq!(extract_imm_s(sw), 2047);
}

#[test]
fn test_assemble_io_instructions() {
    let program = assemble("input x3\nprint x3\nhalt").unwrap();
    assert_eq!(program.code, vec![(3 << 7) | 0x0C, (3 << 7) | 0x0B, 0]);
}

// ============================================================================
// Labels and Branches
// ============================================================================

#[test]
fn test_backward_branch_offset() {
    let program = assemble("label0: add x1, x0, x0\nbeq x0, x0, label0").unwrap();
    assert_eq!(extract_imm_b(program.code[1]), -4);
    assert_eq!(program.code[1], 0xFE00_0EE3);
}

#[test]
fn test_forward_branch_offset() {
    let source = r#"
        addi x5, x0, 3
        addi x6, x0, 3
        beq x5, x6, skip
        addi x7, x0, 99
    skip: halt
    "#;
    let program = assemble(source).unwrap();
    assert_eq!(program.code.len(), 5);
    assert_eq!(extract_imm_b(program.code[2]), 8);
}

#[test]
fn test_all_branch_funct3() {
    let source = r#"
    top:
        beq x1, x2, top
        bne x1, x2, top
        blt x1, x2, top
        bge x1, x2, top
        bltu x1, x2, top
        bgeu x1, x2, top
    "#;
    let program = assemble(source).unwrap();
    let funct3s = [0, 1, 4, 5, 6, 7];

    for (i, (word, funct3)) in program.code.iter().zip(funct3s).enumerate() {
        assert_eq!(extract_opcode(*word), 0x63);
        assert_eq!(extract_funct3(*word), funct3);
        assert_eq!(extract_imm_b(*word), -(i as i32) * 4);
    }
}

#[test]
fn test_jal_offset() {
    let program = assemble("jal x1, func\nhalt\nfunc: print x1").unwrap();
    assert_eq!(extract_opcode(program.code[0]), 0x6F);
    assert_eq!(extract_rd(program.code[0]), 1);
    assert_eq!(extract_imm_j(program.code[0]), 8);
}

#[test]
fn test_label_addresses_count_instruction_lines() {
    let source = "a: b:\naddi x1, x0, 1\n\nc:\n\nd: halt\ne:";
    let lines = tokenize_source(source, 256).unwrap();
    let symbols = resolve(&lines, 16).unwrap();

    // "a: b:" carries a token after the label, so it counts as an instruction line
    assert_eq!(symbols.get("a"), Some(0));
    assert_eq!(symbols.get("b"), None);
    assert_eq!(symbols.get("c"), Some(8));
    assert_eq!(symbols.get("d"), Some(8));
    assert_eq!(symbols.get("e"), Some(12));
}

// ============================================================================
// Public API
// ============================================================================

#[test]
fn test_parse_register_public() {
    assert_eq!(parse_register("x12").unwrap(), Register::X12);
    assert_eq!(parse_register("12").unwrap(), Register::X12);
}

#[test]
fn test_encode_public() {
    let word = encode(&Instruction::Andi { rd: Register::X2, rs1: Register::X3, imm: 255 }).unwrap();
    assert_eq!(word, 0x0FF1_F113);
}

#[test]
fn test_image_bytes_little_endian() {
    let program = assemble("addi x1, x0, 5").unwrap();
    assert_eq!(program.to_bytes(), vec![0x93, 0x00, 0x50, 0x00]);
}
