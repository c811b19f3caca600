//! Integration tests for the MiniRV disassembler
//!
//! Tests the complete disassembly workflow including:
//! - Instruction decoding against assembler output
//! - Listing and source reconstruction
//! - Error handling for invalid encodings

use minirv_assembler::assemble;
use minirv_disassembler::{decode, disassemble, format, to_source, DisassemblerError};
use minirv_spec::{Instruction, Program, Register};

// ============================================================================
// Decode Tests
// ============================================================================

#[test]
fn test_decode_every_mnemonic() {
    let source = r#"
        add x1, x2, x3
        sub x1, x2, x3
        and x1, x2, x3
        or x1, x2, x3
        xor x1, x2, x3
        sll x1, x2, x3
        srl x1, x2, x3
        sra x1, x2, x3
        addi x1, x2, -3
        andi x1, x2, 3
        ori x1, x2, 3
        xori x1, x2, -1
        slli x1, x2, 3
        srli x1, x2, 3
        srai x1, x2, 3
        lw x1, 8(x2)
        sw x1, -8(x2)
        print x1
        input x1
        halt
    "#;
    let program = assemble(source).unwrap();
    let expected: Vec<&str> = source.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    assert_eq!(program.len(), expected.len());
    for (word, text) in program.code.iter().zip(expected) {
        assert_eq!(format(&decode(*word).unwrap()), text);
    }
}

#[test]
fn test_decode_branches() {
    let program = assemble("top: beq x1, x2, top\nbne x1, x2, top\nblt x1, x2, top\nbge x1, x2, top\nbltu x1, x2, top\nbgeu x1, x2, top").unwrap();
    let offsets: Vec<i32> = program
        .code
        .iter()
        .map(|w| decode(*w).unwrap().pc_offset().unwrap())
        .collect();
    assert_eq!(offsets, vec![0, -4, -8, -12, -16, -20]);

    assert!(matches!(decode(program.code[4]).unwrap(), Instruction::Bltu { .. }));
}

#[test]
fn test_decode_jal() {
    let program = assemble("jal x1, end\nhalt\nhalt\nend: halt").unwrap();
    assert_eq!(
        decode(program.code[0]).unwrap(),
        Instruction::Jal { rd: Register::X1, offset: 12 }
    );
}

#[test]
fn test_decode_register_fields() {
    for reg in Register::ALL {
        let program = assemble(&format!("add {r}, {r}, {r}", r = reg)).unwrap();
        assert_eq!(
            decode(program.code[0]).unwrap(),
            Instruction::Add { rd: reg, rs1: reg, rs2: reg }
        );
    }
}

// ============================================================================
// Invalid Encodings
// ============================================================================

#[test]
fn test_unassigned_opcodes() {
    for opcode in [0x01u32, 0x17, 0x37, 0x67, 0x73, 0x7F] {
        assert_eq!(decode(opcode), Err(DisassemblerError::UnknownOpcode(opcode as u8)));
    }
}

#[test]
fn test_unassigned_function_codes() {
    // lw with funct3 = 0 (lb)
    assert!(matches!(decode(0x0000_0003), Err(DisassemblerError::InvalidEncoding(_))));
    // sw with funct3 = 0 (sb)
    assert!(matches!(decode(0x0000_0023), Err(DisassemblerError::InvalidEncoding(_))));
    // add with funct7 = 0x01 (mul)
    assert!(matches!(decode(0x0200_0033), Err(DisassemblerError::InvalidEncoding(_))));
    // opcode 0 with stray bits
    assert!(matches!(decode(0x8000_0000), Err(DisassemblerError::InvalidEncoding(_))));
}

// ============================================================================
// Listing and Source Reconstruction
// ============================================================================

#[test]
fn test_listing_includes_targets() {
    let program = assemble("loop: addi x1, x1, -1\nbne x1, x0, loop\nhalt").unwrap();
    let listing = disassemble(&program);

    assert!(listing.contains("0x0004:"));
    assert!(listing.contains("bne x1, x0, -4  ; -> 0x0000"));
}

#[test]
fn test_source_reassembles_to_same_image() {
    let source = r#"
        input x1
        addi x2, x0, 0
    loop:
        beq x1, x0, done
        add x2, x2, x1
        addi x1, x1, -1
        jal x31, loop
    done:
        print x2
        halt
    "#;
    let program = assemble(source).unwrap();
    let rebuilt = assemble(&to_source(&program).unwrap()).unwrap();
    assert_eq!(rebuilt, program);
}

#[test]
fn test_source_from_empty_program() {
    assert_eq!(to_source(&Program::default()).unwrap(), "");
}
