//! Main disassembler logic

use std::collections::BTreeSet;
use std::fmt::Write;

use minirv_spec::{Instruction, Program, WORD_SIZE};

use crate::decoder::decode;
use crate::error::{DisassemblerError, Result};
use crate::formatter::{branch_target, format_at, format_with_label};

/// Disassemble a program into an annotated listing
///
/// Each line carries the address, the raw word and the decoded text.
/// Words that do not decode are listed with the decode error instead.
pub fn disassemble(program: &Program) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "; MiniRV disassembly");
    let _ = writeln!(
        output,
        "; {} words ({} bytes)",
        program.len(),
        program.size_bytes()
    );
    output.push('\n');

    for (address, &word) in addresses(program).zip(&program.code) {
        let text = match decode(word) {
            Ok(instr) => format_at(&instr, address),
            Err(e) => format!("; ERROR: {}", e),
        };
        let _ = writeln!(output, "0x{:04X}:  {:08X}  {}", address, word, text);
    }

    output
}

/// Reconstruct assembler source from a program
///
/// Control-flow targets become synthetic `L<addr>` labels so the result
/// assembles back to the same image. Fails if any word does not decode or
/// a target cannot be expressed as a label.
pub fn to_source(program: &Program) -> Result<String> {
    let decoded: Vec<(u32, Instruction)> = addresses(program)
        .zip(&program.code)
        .map(|(address, &word)| decode(word).map(|instr| (address, instr)))
        .collect::<Result<_>>()?;

    let end = program.size_bytes() as u32;
    let mut targets = BTreeSet::new();
    for (address, instr) in &decoded {
        let Some(offset) = instr.pc_offset() else {
            continue;
        };
        match branch_target(instr, *address) {
            Some(target) if target % WORD_SIZE == 0 && target <= end => {
                targets.insert(target);
            }
            _ => {
                return Err(DisassemblerError::UnrepresentableTarget {
                    address: *address,
                    offset,
                })
            }
        }
    }

    let mut output = String::new();
    for (address, instr) in &decoded {
        if targets.contains(address) {
            let _ = writeln!(output, "{}:", label_name(*address));
        }
        let text = match branch_target(instr, *address) {
            Some(target) => format_with_label(instr, &label_name(target)),
            None => instr.to_string(),
        };
        let _ = writeln!(output, "    {}", text);
    }
    if targets.contains(&end) {
        let _ = writeln!(output, "{}:", label_name(end));
    }

    Ok(output)
}

fn addresses(program: &Program) -> impl Iterator<Item = u32> + '_ {
    (0..program.len() as u32).map(|i| i * WORD_SIZE)
}

fn label_name(address: u32) -> String {
    format!("L{:04X}", address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disassemble_simple() {
        let program = Program::new(vec![0x0050_0093, 0x0000_008B, 0x0000_0000]);
        let asm = disassemble(&program);

        assert!(asm.contains("; 3 words (12 bytes)"));
        assert!(asm.contains("0x0000:  00500093  addi x1, x0, 5"));
        assert!(asm.contains("0x0004:  0000008B  print x1"));
        assert!(asm.contains("0x0008:  00000000  halt"));
    }

    #[test]
    fn test_disassemble_reports_bad_words() {
        let program = Program::new(vec![0x0000_0037]);
        let asm = disassemble(&program);
        assert!(asm.contains("; ERROR: Unknown opcode: 0x37"));
    }

    #[test]
    fn test_to_source_backward_branch() {
        // add x1, x0, x0 ; beq x0, x0, -4
        let program = Program::new(vec![0x0000_00B3, 0xFE00_0EE3]);
        let source = to_source(&program).unwrap();
        assert_eq!(source, "L0000:\n    add x1, x0, x0\n    beq x0, x0, L0000\n");
    }

    #[test]
    fn test_to_source_target_at_end() {
        // jal x0, 4 jumps just past the last word
        let program = Program::new(vec![0x0040_006F]);
        let source = to_source(&program).unwrap();
        assert_eq!(source, "    jal x0, L0004\nL0004:\n");
    }

    #[test]
    fn test_to_source_rejects_unreachable_target() {
        // beq x0, x0, 64 in a one-word program
        let program = Program::new(vec![0x0400_0063]);
        assert_eq!(
            to_source(&program),
            Err(DisassemblerError::UnrepresentableTarget { address: 0, offset: 64 })
        );
    }

    #[test]
    fn test_to_source_rejects_bad_word() {
        let program = Program::new(vec![0, 0x0000_2033]);
        assert_eq!(to_source(&program), Err(DisassemblerError::InvalidEncoding(0x0000_2033)));
    }
}
