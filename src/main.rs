use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use rd1dump::dump;
#[cfg(not(feature = "sandbox"))]
use rd1dump::mem::DevMemReader;
#[cfg(feature = "sandbox")]
use rd1dump::mem::SandboxReader;

/// Dump live hardware register values for a CTT rd1 register list.
#[derive(Debug, Parser)]
#[command(name = "rd1dump", version, about)]
struct Args {
    /// CTT generated dump-out file (rd1 format).
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    input: PathBuf,

    /// Output file for read-in by CTT (rd1 format); omit to dump to stdout.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    #[cfg(feature = "sandbox")]
    let mut reader = SandboxReader;
    #[cfg(not(feature = "sandbox"))]
    let mut reader = DevMemReader;

    match dump::run(&args.input, args.output.as_deref(), &mut reader) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("rd1dump: {err}");
            let mut cause = err.source();
            while let Some(source) = cause {
                eprintln!("  caused by: {source}");
                cause = source.source();
            }
            ExitCode::FAILURE
        }
    }
}
