//! Instruction formatting to assembly text

use minirv_spec::Instruction;

/// Format instruction as assembly text
///
/// Branch and jump displacements are printed as signed byte offsets.
pub fn format(instr: &Instruction) -> String {
    instr.to_string()
}

/// Absolute target of a branch or jump located at `address`
///
/// Returns `None` for non-control-flow instructions or when the target
/// would fall below address zero.
pub fn branch_target(instr: &Instruction, address: u32) -> Option<u32> {
    let offset = instr.pc_offset()?;
    let target = address as i64 + offset as i64;
    u32::try_from(target).ok()
}

/// Format instruction with its resolved target appended as a comment
pub fn format_at(instr: &Instruction, address: u32) -> String {
    match branch_target(instr, address) {
        Some(target) => format!("{}  ; -> 0x{:04X}", instr, target),
        None => format(instr),
    }
}

/// Format instruction, replacing the numeric displacement with `label`
///
/// Non-control-flow instructions ignore `label`.
pub fn format_with_label(instr: &Instruction, label: &str) -> String {
    match instr {
        Instruction::Beq { rs1, rs2, .. }
        | Instruction::Bne { rs1, rs2, .. }
        | Instruction::Blt { rs1, rs2, .. }
        | Instruction::Bge { rs1, rs2, .. }
        | Instruction::Bltu { rs1, rs2, .. }
        | Instruction::Bgeu { rs1, rs2, .. } => {
            format!("{} {}, {}, {}", instr.mnemonic(), rs1, rs2, label)
        }
        Instruction::Jal { rd, .. } => format!("{} {}, {}", instr.mnemonic(), rd, label),
        _ => format(instr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minirv_spec::Register;

    #[test]
    fn test_format_plain() {
        let instr = Instruction::Sra { rd: Register::X1, rs1: Register::X2, rs2: Register::X3 };
        assert_eq!(format(&instr), "sra x1, x2, x3");
        assert_eq!(format_at(&instr, 0x40), "sra x1, x2, x3");
    }

    #[test]
    fn test_format_at_branch() {
        let instr = Instruction::Bne { rs1: Register::X1, rs2: Register::X0, offset: -8 };
        assert_eq!(format_at(&instr, 0x10), "bne x1, x0, -8  ; -> 0x0008");
    }

    #[test]
    fn test_branch_target_below_zero() {
        let instr = Instruction::Jal { rd: Register::X1, offset: -8 };
        assert_eq!(branch_target(&instr, 4), None);
        assert_eq!(format_at(&instr, 4), "jal x1, -8");
    }

    #[test]
    fn test_format_with_label() {
        let beq = Instruction::Beq { rs1: Register::X5, rs2: Register::X6, offset: 8 };
        assert_eq!(format_with_label(&beq, "L0010"), "beq x5, x6, L0010");

        let jal = Instruction::Jal { rd: Register::X0, offset: 0 };
        assert_eq!(format_with_label(&jal, "loop"), "jal x0, loop");

        assert_eq!(format_with_label(&Instruction::Halt, "unused"), "halt");
    }
}
