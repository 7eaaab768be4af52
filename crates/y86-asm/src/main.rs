//! CLI entry point for the `y86` driver binary.
//!
//! Assembles one source file, loads it into a fresh CPU, ticks until the
//! status leaves `OK` (or an optional tick cap is reached), then prints
//! the final register file and data memory to stdout. Exits nonzero when
//! assembly fails or the CPU ends anywhere but a clean halt.

use std::env;
use std::ffi::OsString;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use y86_asm::{assemble, load, Program};
use y86_core::state::{Register, Status};
use y86_core::Cpu;
#[cfg(test)]
use tempfile as _;

const HELP_TEXT: &str = "Usage: y86 <source> [--max-ticks <n>] [--help]";

#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    source: PathBuf,
    max_ticks: Option<u64>,
}

#[derive(Debug)]
enum ParseResult {
    Args(CliArgs),
    Help,
}

fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let mut source: Option<PathBuf> = None;
    let mut max_ticks: Option<u64> = None;

    while let Some(arg) = args.next() {
        if arg == "--help" {
            return Ok(ParseResult::Help);
        }

        if arg == "--max-ticks" {
            let value = args
                .next()
                .ok_or_else(|| String::from("missing value for --max-ticks"))?;
            let parsed = value
                .to_string_lossy()
                .parse::<u64>()
                .map_err(|_| format!("invalid value for --max-ticks: {}", value.to_string_lossy()))?;
            max_ticks = Some(parsed);
            continue;
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if source.is_some() {
            return Err(String::from("multiple source paths provided"));
        }
        source = Some(PathBuf::from(arg));
    }

    let source = source.ok_or_else(|| String::from("missing source path"))?;
    Ok(ParseResult::Args(CliArgs { source, max_ticks }))
}

fn main() -> ExitCode {
    match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{HELP_TEXT}");
            ExitCode::SUCCESS
        }
        Ok(ParseResult::Args(args)) => run(&args),
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{HELP_TEXT}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> ExitCode {
    let src = match fs::read_to_string(&args.source) {
        Ok(src) => src,
        Err(error) => {
            eprintln!("error: cannot read {}: {error}", args.source.display());
            return ExitCode::FAILURE;
        }
    };

    let program = match assemble(&src) {
        Ok(program) => program,
        Err(error) => {
            eprintln!("{}", error.format_for_stderr(&args.source));
            return ExitCode::FAILURE;
        }
    };

    let mut cpu = Cpu::new();
    if let Err(error) = load(&program, &mut cpu) {
        eprintln!("error: {error}");
        return ExitCode::FAILURE;
    }

    let mut ticks: u64 = 0;
    while cpu.status().is_running() && args.max_ticks.is_none_or(|cap| ticks < cap) {
        cpu.tick();
        ticks += 1;
    }

    print!("{}", render_final_state(&cpu, &program));

    if cpu.status() == Status::Hlt {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Renders the status, register file, and data memory after the run.
fn render_final_state(cpu: &Cpu, program: &Program) -> String {
    let mut out = String::new();
    let status = cpu.status();
    let _ = writeln!(out, "status: {} ({status})", status.name());

    let _ = writeln!(out, "registers:");
    for reg in Register::ALL {
        let value = cpu.regs().get(reg);
        let _ = writeln!(out, "  {:<5} {:#018x}  {}", reg.name(), value, value);
    }

    if !program.data.is_empty() {
        let _ = writeln!(out, "data memory:");
        for &addr in program.data.keys() {
            if let Ok(value) = cpu.mem().read_quad(i64::from(addr)) {
                let _ = writeln!(out, "  {addr:#06x}: {value}");
            }
        }
    }

    out
}
