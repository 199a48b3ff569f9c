use anyhow::{Context, Result};
use intelhex_core::{ScanStats, Scanner, StartAddress};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::{info, warn};

use super::open_input;

#[derive(Serialize, Deserialize)]
pub struct RecoveredSegment {
    pub address: u32,
    pub len: usize,
    pub data: String,
}

#[derive(Serialize, Deserialize)]
pub struct ScanReport {
    pub stats: ScanStats,
    pub start_address: Option<StartAddress>,
    pub segments: Vec<RecoveredSegment>,
    pub error: Option<String>,
}

pub fn execute(input: &str, output: Option<&str>, stats_only: bool) -> Result<()> {
    info!("Scanning file: {}", input);

    let reader = open_input(Some(input))?;
    let mut scanner = Scanner::from_reader(reader);

    let mut segments = Vec::new();
    while scanner.advance() {
        if let Some(segment) = scanner.segment() {
            segments.push(RecoveredSegment {
                address: segment.address,
                len: segment.len(),
                data: hex::encode_upper(&segment.data),
            });
        }
    }

    let error = scanner.err().map(|e| e.to_string());
    if let Some(e) = &error {
        warn!("Scan stopped: {}", e);
    }

    let stats = scanner.stats().clone();

    // Print statistics
    println!("\n=== Scan Results ===");
    println!("Lines read:        {}", stats.lines_read);
    println!("Blank lines:       {}", stats.blank_lines);
    println!("Records decoded:   {}", stats.records);
    println!("Data records:      {}", stats.data_records);
    println!("Data bytes:        {} bytes", stats.data_bytes);
    println!("Address records:   {}", stats.extended_address_records);
    println!("Start records:     {}", stats.start_address_records);
    if let Some(start) = scanner.start_address() {
        println!("Start address:     {}", describe_start(start));
    }
    match &error {
        Some(e) => println!("Status:            error: {}", e),
        None => println!("Status:            ok"),
    }
    println!();

    if stats_only {
        return Ok(());
    }

    let report = ScanReport {
        stats,
        start_address: scanner.start_address(),
        segments,
        error,
    };

    if let Some(output_path) = output {
        // Write to JSON file
        let json = serde_json::to_string_pretty(&report)
            .with_context(|| "Failed to serialize scan report")?;

        fs::write(output_path, json)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;

        info!("Scan report written to: {}", output_path);
    } else {
        // Print to stdout
        println!("=== Segments ===");
        for segment in &report.segments {
            println!("0x{:08X}: {} bytes", segment.address, segment.len);
        }
    }

    Ok(())
}

fn describe_start(start: StartAddress) -> String {
    match start {
        StartAddress::Segmented { cs, ip } => format!("{:04X}:{:04X}", cs, ip),
        StartAddress::Linear(eip) => format!("0x{:08X}", eip),
    }
}
