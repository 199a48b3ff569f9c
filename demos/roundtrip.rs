//! Scan a small HEX file, rewrite it, and show what changed

use intelhex_core::{parse_str, Scanner, SegmentList};

const INPUT: &str = "
:020000021000EC
:10010000214601360121470136007EFE09D2190140
:100110002146017E17C20001FF5F16002148011928
:0400000300003800C1
:00000001FF
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Intel HEX Round Trip Example\n");

    // Step 1: Scan with the pull API to show addresses and stats
    let mut scanner = Scanner::from_slice(INPUT.as_bytes());
    while scanner.advance() {
        if let Some(segment) = scanner.segment() {
            println!("Segment @ 0x{:08X}: {} bytes", segment.address, segment.len());
        }
    }
    if let Some(err) = scanner.err() {
        return Err(format!("scan failed: {}", err).into());
    }
    println!("Start address: {:?}", scanner.start_address());
    println!("Stats: {:?}\n", scanner.stats());

    // Step 2: Collect, sort and rewrite; segmented addressing becomes linear
    let mut segments: SegmentList = parse_str(INPUT)?;
    segments.sort();
    let output = segments.to_hex_string()?;
    println!("Rewritten:\n{}", output);

    // Step 3: The rewritten text carries the same segments
    assert_eq!(parse_str(&output)?, segments);
    println!("Span: {} bytes", segments.span());

    Ok(())
}
