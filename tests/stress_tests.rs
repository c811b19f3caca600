//! Stress tests: long runs, large images and capacity limits

use minirv::assemble_and_run;
use minirv_assembler::{assemble, AssemblerError, Resource};
use minirv_disassembler::disassemble;
use minirv_runtime::{BufferedIo, HaltReason, VMConfig, VM};
use minirv_spec::MEMORY_SIZE;

#[test]
fn test_long_running_loop() {
    // 2000 * 1000 iterations of a 3-instruction inner loop
    let source = r#"
        addi x1, x0, 2000
    outer:
        addi x2, x0, 1000
    inner:
        addi x3, x3, 1
        addi x2, x2, -1
        bne x2, x0, inner
        addi x1, x1, -1
        bne x1, x0, outer
        print x3
        halt
    "#;
    let (result, lines) = assemble_and_run(source, vec![]).unwrap();
    assert_eq!(lines, vec!["x3 = 2000000"]);
    assert_eq!(result.halt_reason, HaltReason::Halt);
    assert!(result.cycles > 6_000_000);
}

#[test]
fn test_infinite_loop_hits_cycle_limit() {
    let program = assemble("top: addi x1, x1, 1\njal x0, top").unwrap();
    let config = VMConfig { max_cycles: 50_000, ..VMConfig::default() };
    let mut vm = VM::new(&program, BufferedIo::default(), config).unwrap();

    let result = vm.run();
    assert_eq!(result.halt_reason, HaltReason::CycleLimit);
    assert_eq!(result.cycles, 50_000);
    assert_eq!(result.registers[1], 25_000);
}

#[test]
fn test_program_filling_memory() {
    let words = MEMORY_SIZE / 4;
    let mut source = "addi x1, x1, 1\n".repeat(words - 2);
    source.push_str("print x1\nhalt\n");

    let program = assemble(&source).unwrap();
    assert_eq!(program.size_bytes(), MEMORY_SIZE);

    let (result, lines) = assemble_and_run(&source, vec![]).unwrap();
    assert_eq!(lines, vec![format!("x1 = {}", words - 2)]);
    assert_eq!(result.pc as usize, MEMORY_SIZE - 4);
}

#[test]
fn test_program_overflowing_memory() {
    let source = "addi x1, x1, 1\n".repeat(MEMORY_SIZE / 4 + 1);
    assert!(matches!(
        assemble(&source),
        Err(AssemblerError::CapacityExceeded { resource: Resource::ProgramWords, .. })
    ));
}

#[test]
fn test_fall_through_end_of_memory_faults() {
    // Every word is a no-op, so the pc walks off the end of memory
    let source = "addi x0, x0, 0\n".repeat(MEMORY_SIZE / 4);
    let (result, _) = assemble_and_run(&source, vec![]).unwrap();
    assert!(matches!(result.halt_reason, HaltReason::Fault { pc: 0x10000, .. }));
}

#[test]
fn test_many_labels() {
    let mut source = String::new();
    for i in 0..1000 {
        source.push_str(&format!("l{}: addi x1, x1, 1\n", i));
    }
    source.push_str("beq x0, x0, l0\n");

    let program = assemble(&source).unwrap();
    assert_eq!(program.len(), 1001);
    assert!(disassemble(&program).lines().count() > 1001);
}

#[test]
fn test_label_limit() {
    let mut source = String::new();
    for i in 0..1025 {
        source.push_str(&format!("l{}:\n", i));
    }
    assert!(matches!(
        assemble(&source),
        Err(AssemblerError::CapacityExceeded { line: 1025, resource: Resource::Labels, .. })
    ));
}
