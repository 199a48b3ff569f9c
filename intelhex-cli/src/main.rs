use anyhow::Result;
use clap::{Parser, Subcommand};
use intelhex_cli::{commands, parse_u32, parse_u8};
use intelhex_core::constants::{DEFAULT_FILL_BYTE, DEFAULT_RECORD_SIZE};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "ihex")]
#[command(about = "ihex - Intel HEX converter and inspector", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a HEX file into a flat binary image
    ToBin {
        /// Input HEX file (stdin if omitted or "-")
        input: Option<String>,

        /// Output binary file (stdout if omitted or "-")
        output: Option<String>,

        /// Byte used to fill gaps between segments
        #[arg(long, default_value_t = DEFAULT_FILL_BYTE, value_parser = parse_u8)]
        fill: u8,
    },

    /// Convert a flat binary image into a HEX file
    FromBin {
        /// Input binary file ("-" for stdin)
        #[arg(short, long)]
        input: String,

        /// Output HEX file ("-" for stdout)
        #[arg(short, long)]
        output: String,

        /// Load address of the first byte (decimal or 0x-prefixed hex)
        #[arg(long, default_value = "0", value_parser = parse_u32)]
        base: u32,

        /// Data bytes per record (1-255)
        #[arg(long, default_value_t = DEFAULT_RECORD_SIZE)]
        record_size: usize,
    },

    /// Scan a HEX file and report its segments
    Scan {
        /// Input file to scan
        #[arg(short, long)]
        input: String,

        /// Output JSON file for the scan report
        #[arg(short, long)]
        output: Option<String>,

        /// Show statistics only
        #[arg(long)]
        stats_only: bool,
    },

    /// Verify a HEX file: checksums, structure, overlaps
    Verify {
        /// Input file to verify
        #[arg(short, long)]
        input: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging; stdout may carry binary output, so logs go to stderr
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::ToBin {
            input,
            output,
            fill,
        } => commands::to_bin::execute(input.as_deref(), output.as_deref(), fill),

        Commands::FromBin {
            input,
            output,
            base,
            record_size,
        } => commands::from_bin::execute(
            Some(input.as_str()),
            Some(output.as_str()),
            base,
            record_size,
        ),

        Commands::Scan {
            input,
            output,
            stats_only,
        } => commands::scan::execute(&input, output.as_deref(), stats_only),

        Commands::Verify { input } => commands::verify::execute(&input),
    }
}
