//! rnbfx CLI — XML <-> .NET Binary XML conversion.

#[cfg(feature = "fast-alloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::fs::File;
use std::io::{Read, Write};
use std::process;

use clap::{Args, Parser, Subcommand};
use rnbfx::{nbfs, Decoder, Encoder};

#[derive(Parser)]
#[command(name = "rnbfx", about = "XML <-> .NET Binary XML (MC-NBFX / MC-NBFS) conversion")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode XML to NBFX bytes
    Encode(CommonArgs),
    /// Decode NBFX bytes to XML
    Decode(CommonArgs),
}

#[derive(Args)]
struct CommonArgs {
    /// Input file (- for stdin)
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Output file (- for stdout)
    #[arg(short, long, default_value = "-")]
    output: String,

    /// Use the well-known MC-NBFS SOAP dictionary
    #[arg(long)]
    nbfs: bool,
}

fn main() {
    if let Err(message) = run() {
        eprintln!("rnbfx: {message}");
        process::exit(1);
    }
}

fn run() -> Result<(), String> {
    match Cli::parse().command {
        Command::Encode(args) => {
            let encoder = if args.nbfs { nbfs::encoder() } else { Encoder::new() };
            let bytes = encoder
                .encode(open_input(&args.input)?)
                .map_err(|e| e.to_string())?;
            write_output(&args.output, &bytes)
        }
        Command::Decode(args) => {
            let decoder = if args.nbfs { nbfs::decoder() } else { Decoder::new() };
            let xml = decoder
                .decode(open_input(&args.input)?)
                .map_err(|e| e.to_string())?;
            write_output(&args.output, xml.as_bytes())
        }
    }
}

fn open_input(path: &str) -> Result<Box<dyn Read>, String> {
    if path == "-" {
        Ok(Box::new(std::io::stdin().lock()))
    } else {
        let file = File::open(path).map_err(|e| format!("open {path}: {e}"))?;
        Ok(Box::new(file))
    }
}

fn write_output(path: &str, bytes: &[u8]) -> Result<(), String> {
    if path == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(bytes)
            .and_then(|()| stdout.flush())
            .map_err(|e| format!("write stdout: {e}"))
    } else {
        std::fs::write(path, bytes).map_err(|e| format!("write {path}: {e}"))
    }
}
