use anyhow::{bail, Result};
use colored::*;
use intelhex_core::{ErrorKind, Scanner, Segment, SegmentList};
use tracing::{info, warn};

use super::open_input;

/// A pair of segments whose address ranges intersect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    /// Start of the earlier segment
    pub first: u32,
    /// Start of the segment that begins inside it
    pub second: u32,
}

pub fn execute(input: &str) -> Result<()> {
    info!("Verifying file: {}", input);

    let reader = open_input(Some(input))?;
    let mut scanner = Scanner::from_reader(reader);

    let mut segments = SegmentList::new();
    while scanner.advance() {
        if let Some(segment) = scanner.segment() {
            segments.push(segment.clone());
        }
    }

    println!("\n=== Verification Results ===");
    println!("Segments found:     {}", segments.len());
    println!("Lines read:         {}", scanner.stats().lines_read);

    if let Some(err) = scanner.err() {
        let kind = match err.kind() {
            ErrorKind::Checksum => "checksum",
            ErrorKind::InvalidRecordType => "record type",
            ErrorKind::Format => "format",
            ErrorKind::Io => "I/O",
        };
        println!(
            "{} {} error after line {}: {}",
            "✗".red(),
            kind,
            scanner.stats().lines_read,
            err
        );
        bail!("{} is not a valid Intel HEX file: {}", input, err);
    }

    segments.sort();
    println!("Address span:       {} bytes", segments.span());

    let overlaps = find_overlaps(&segments);

    println!("\n=== Overlap Analysis ===");
    if overlaps.is_empty() {
        println!("{} No overlapping segments", "✓".green());
    } else {
        println!("{} {} overlapping segments", "!".yellow(), overlaps.len());
        for o in &overlaps {
            warn!("Segment at 0x{:08X} overlaps 0x{:08X}", o.second, o.first);
        }
    }

    println!("\n=== Summary ===");
    if overlaps.is_empty() {
        println!("{} File is valid", "✓".green());
    } else {
        println!("{} File is valid but has overlapping data", "!".yellow());
    }

    Ok(())
}

/// Report segments that start before the end of an earlier one
///
/// `segments` must be sorted by address.
pub fn find_overlaps(segments: &SegmentList) -> Vec<Overlap> {
    let mut overlaps = Vec::new();
    let mut furthest: Option<&Segment> = None;

    for segment in segments {
        if let Some(prev) = furthest {
            if (segment.address as u64) < prev.end() {
                overlaps.push(Overlap {
                    first: prev.address,
                    second: segment.address,
                });
            }
        }
        if furthest.map_or(true, |prev| segment.end() > prev.end()) {
            furthest = Some(segment);
        }
    }

    overlaps
}
