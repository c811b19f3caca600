//! `minirv` command-line front end

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use minirv_assembler::assemble;
use minirv_disassembler::{disassemble, to_source};
use minirv_runtime::{StreamIo, VMConfig, VM};
use minirv_spec::Program;

#[derive(Parser)]
#[command(name = "minirv", author, version, about = "MiniRV assembler and virtual machine", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assemble a source file into a binary image
    Asm {
        input: PathBuf,
        output: PathBuf,
    },

    /// Execute a binary image
    Run {
        #[arg(default_value = "vm/program.bin")]
        image: PathBuf,

        /// Stop after this many instructions
        #[arg(long, default_value_t = VMConfig::default().max_cycles)]
        max_cycles: u64,

        /// Log every executed instruction
        #[arg(long)]
        trace: bool,
    },

    /// Print a listing of a binary image
    Disasm {
        image: PathBuf,

        /// Emit re-assemblable source instead of a listing
        #[arg(long)]
        source: bool,
    },
}

fn init_logging(verbose: u8, trace: bool) {
    let default = match (verbose, trace) {
        (_, true) | (2.., _) => "trace",
        (1, _) => "debug",
        _ => "warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let trace = matches!(cli.command, Command::Run { trace: true, .. });
    init_logging(cli.verbose, trace);

    match cli.command {
        Command::Asm { input, output } => {
            let source = fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let program = assemble(&source)
                .with_context(|| format!("failed to assemble {}", input.display()))?;
            fs::write(&output, program.to_bytes())
                .with_context(|| format!("failed to write {}", output.display()))?;
            info!(words = program.len(), output = %output.display(), "assembled");
            Ok(ExitCode::SUCCESS)
        }

        Command::Run { image, max_cycles, trace } => {
            let bytes = fs::read(&image)
                .with_context(|| format!("failed to read {}", image.display()))?;
            let config = VMConfig { max_cycles, trace };
            let mut vm = VM::from_image(&bytes, StreamIo::stdio(), config)
                .with_context(|| format!("failed to load {}", image.display()))?;

            let result = vm.run();
            info!(cycles = result.cycles, pc = result.pc, "run complete");

            if result.halt_reason.is_normal() {
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("minirv: {}", result.halt_reason);
                Ok(ExitCode::FAILURE)
            }
        }

        Command::Disasm { image, source } => {
            let bytes = fs::read(&image)
                .with_context(|| format!("failed to read {}", image.display()))?;
            let program = Program::from_bytes(&bytes)
                .with_context(|| format!("failed to load {}", image.display()))?;

            if source {
                print!("{}", to_source(&program)?);
            } else {
                print!("{}", disassemble(&program));
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
