//! Subcommand implementations
//!
//! Paths of `None` or `-` mean stdin / stdout.

pub mod from_bin;
pub mod scan;
pub mod to_bin;
pub mod verify;

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Read, Write};

/// Open a HEX input for line-by-line reading
pub fn open_input(path: Option<&str>) -> Result<Box<dyn BufRead>> {
    match path {
        None | Some("-") => Ok(Box::new(io::stdin().lock())),
        Some(p) => {
            let file = File::open(p).with_context(|| format!("Failed to open input file: {}", p))?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// Read a whole binary input
pub fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        None | Some("-") => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
        Some(p) => fs::read(p).with_context(|| format!("Failed to read input file: {}", p)),
    }
}

/// Write bytes to the output
pub fn write_output(path: Option<&str>, data: &[u8]) -> Result<()> {
    match path {
        None | Some("-") => {
            let mut out = io::stdout().lock();
            out.write_all(data).context("Failed to write to stdout")?;
            out.flush().context("Failed to flush stdout")
        }
        Some(p) => fs::write(p, data).with_context(|| format!("Failed to write output file: {}", p)),
    }
}
