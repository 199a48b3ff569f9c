//! Property-based tests using proptest

use intelhex_core::{
    decoder::{decode_line, decode_record},
    encoder::{checksum, encode_line, encode_record},
    parse_str, Record, Scanner, Segment, SegmentList,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_round_trip_encode_decode(
        address in any::<u16>(),
        data in prop::collection::vec(any::<u8>(), 0..=255)
    ) {
        let record = Record::data(address, data).unwrap();
        let encoded = encode_record(&record).unwrap();
        let decoded = decode_record(&encoded).unwrap();

        prop_assert_eq!(&decoded, &record);
        prop_assert_eq!(checksum(&encoded[..encoded.len() - 1]), decoded.checksum);
    }

    #[test]
    fn prop_line_round_trip(upper in any::<u16>()) {
        let record = Record::extended_linear_address(upper);
        let line = encode_line(&record).unwrap();

        prop_assert_eq!(decode_line(line.as_bytes()).unwrap(), record);
    }

    #[test]
    fn prop_decode_never_panics(
        data in prop::collection::vec(any::<u8>(), 0..512)
    ) {
        let result = decode_record(&data);
        prop_assert!(result.is_ok() || result.is_err());
    }

    #[test]
    fn prop_single_bit_flip_is_rejected(
        address in any::<u16>(),
        data in prop::collection::vec(any::<u8>(), 1..64),
        bit in 0usize..8,
        index_seed in any::<usize>()
    ) {
        let record = Record::data(address, data).unwrap();
        let mut encoded = encode_record(&record).unwrap().to_vec();

        // Skip the count and type bytes so the record stays structurally valid
        let positions = [1usize, 2].into_iter().chain(4..encoded.len()).collect::<Vec<_>>();
        let pos = positions[index_seed % positions.len()];
        encoded[pos] ^= 1 << bit;

        let err = decode_record(&encoded).unwrap_err();
        prop_assert!(err.is_checksum());
    }

    #[test]
    fn prop_scan_never_panics(
        text in "[:0-9A-Fa-f\r\n]{0,512}"
    ) {
        let scanner = Scanner::from_slice(text.as_bytes());
        let results: Vec<_> = scanner.collect();
        // At most one error, and only as the final item
        let errors = results.iter().filter(|r| r.is_err()).count();
        prop_assert!(errors <= 1);
        if errors == 1 {
            prop_assert!(results.last().unwrap().is_err());
        }
    }

    #[test]
    fn prop_write_then_scan_recovers_segments(
        chunks in prop::collection::btree_map(
            any::<u32>().prop_map(|a| a & !0xFF),
            prop::collection::vec(any::<u8>(), 1..=255),
            0..16
        )
    ) {
        // Keys are 256-aligned and payloads under 256 bytes, so nothing overlaps
        let mut list: SegmentList = chunks
            .into_iter()
            .map(|(address, data)| Segment::new(address, data))
            .collect();
        list.sort();

        let text = list.to_hex_string().unwrap();
        let rescanned = parse_str(&text).unwrap();

        prop_assert_eq!(rescanned, list);
    }
}
