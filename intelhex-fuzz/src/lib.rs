//! Fuzzing entry points for intelhex-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Call these from fuzz targets, e.g. `fuzz_target!(|data: &[u8]| fuzz_scan(data));`

pub fn fuzz_decode(data: &[u8]) {
    use intelhex_core::decoder::decode_record;

    // Try to decode - should never panic
    let _ = decode_record(data);
}

pub fn fuzz_line(data: &[u8]) {
    use intelhex_core::decoder::decode_line;

    let _ = decode_line(data);
}

pub fn fuzz_scan(data: &[u8]) {
    use intelhex_core::Scanner;

    // Try to scan - should never panic, and must stop after at most one error
    let mut errors = 0;
    for item in Scanner::from_slice(data) {
        if item.is_err() {
            errors += 1;
        }
    }
    assert!(errors <= 1);
}

/// Re-encode whatever decodes; the bytes must come back unchanged
pub fn fuzz_round_trip(data: &[u8]) {
    use intelhex_core::{decoder::decode_record, encoder::encode_record};

    if let Ok(record) = decode_record(data) {
        let encoded = encode_record(&record).expect("decoded record must re-encode");
        assert_eq!(encoded.as_ref(), data);
    }
}
