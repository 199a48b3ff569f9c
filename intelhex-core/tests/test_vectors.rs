//! Reference records for every record type, plus the malformed variants the
//! decoder must reject.

use intelhex_core::{
    decoder::{decode_line, decode_record},
    encoder::{checksum, encode_record},
    error::Field,
    HexError, RecordType,
};

fn raw(s: &str) -> Vec<u8> {
    hex::decode(s).unwrap()
}

struct Vector {
    hex: &'static str,
    byte_count: u8,
    address: u16,
    record_type: RecordType,
    data: &'static str,
    checksum: u8,
}

const VALID: &[Vector] = &[
    Vector {
        hex: "10010000214601360121470136007EFE09D2190140",
        byte_count: 0x10,
        address: 0x0100,
        record_type: RecordType::Data,
        data: "214601360121470136007EFE09D21901",
        checksum: 0x40,
    },
    Vector {
        hex: "00000001FF",
        byte_count: 0x00,
        address: 0x0000,
        record_type: RecordType::EndOfFile,
        data: "",
        checksum: 0xFF,
    },
    Vector {
        hex: "020000021200EA",
        byte_count: 0x02,
        address: 0x0000,
        record_type: RecordType::ExtendedSegmentAddress,
        data: "1200",
        checksum: 0xEA,
    },
    Vector {
        hex: "0400000300003800C1",
        byte_count: 0x04,
        address: 0x0000,
        record_type: RecordType::StartSegmentAddress,
        data: "00003800",
        checksum: 0xC1,
    },
    Vector {
        hex: "02000004FFFFFC",
        byte_count: 0x02,
        address: 0x0000,
        record_type: RecordType::ExtendedLinearAddress,
        data: "FFFF",
        checksum: 0xFC,
    },
    Vector {
        hex: "04000005000000CD2A",
        byte_count: 0x04,
        address: 0x0000,
        record_type: RecordType::StartLinearAddress,
        data: "000000CD",
        checksum: 0x2A,
    },
];

#[test]
fn test_checksum_reference() {
    assert_eq!(checksum(&raw("0300300002337A")), 0x1E);
}

#[test]
fn test_decode_all_record_types() {
    for v in VALID {
        let record = decode_record(&raw(v.hex))
            .unwrap_or_else(|e| panic!("{} failed to decode: {}", v.hex, e));

        assert_eq!(record.byte_count, v.byte_count, "{}", v.hex);
        assert_eq!(record.address, v.address, "{}", v.hex);
        assert_eq!(record.record_type, v.record_type, "{}", v.hex);
        assert_eq!(record.data.as_ref(), raw(v.data).as_slice(), "{}", v.hex);
        assert_eq!(record.checksum, v.checksum, "{}", v.hex);
    }
}

#[test]
fn test_reencode_all_record_types() {
    for v in VALID {
        let bytes = raw(v.hex);
        let record = decode_record(&bytes).unwrap();
        let encoded = encode_record(&record).unwrap();

        assert_eq!(encoded.as_ref(), bytes.as_slice(), "{}", v.hex);
        assert_eq!(checksum(&bytes[..bytes.len() - 1]), record.checksum);
    }
}

#[test]
fn test_reject_empty() {
    assert!(matches!(
        decode_record(&[]),
        Err(HexError::UnexpectedEnd {
            field: Field::ByteCount
        })
    ));
}

#[test]
fn test_reject_invalid_record_type() {
    let err = decode_record(&raw("020000061200EA")).unwrap_err();
    assert!(err.is_invalid_record_type());
}

#[test]
fn test_reject_checksum_error() {
    let err = decode_record(&raw("04000005000000CD2B")).unwrap_err();
    assert!(err.is_checksum());
}

#[test]
fn test_reject_extended_address_byte_counts() {
    for text in ["040000021200EA", "04000004FFFFFC"] {
        let err = decode_record(&raw(text)).unwrap_err();
        assert!(
            matches!(err, HexError::BadAddressRecordLength { byte_count: 4, .. }),
            "{}: {:?}",
            text,
            err
        );
    }
}

#[test]
fn test_reject_byte_count_too_short() {
    // Declared 3, actual 4: the data field swallows one byte, the old
    // checksum becomes a trailing byte
    let err = decode_record(&raw("03000005000000CD2A")).unwrap_err();
    assert!(matches!(err, HexError::TrailingBytes(1)));
}

#[test]
fn test_reject_byte_count_too_long() {
    let err = decode_record(&raw("05000005000000CD2A")).unwrap_err();
    assert!(matches!(
        err,
        HexError::UnexpectedEnd {
            field: Field::Checksum
        }
    ));
}

#[test]
fn test_reject_data_too_short() {
    let err = decode_record(&raw("040000050000002A")).unwrap_err();
    assert!(err.is_format());
}

#[test]
fn test_reject_data_too_long() {
    let err = decode_record(&raw("04000005000000CDDEADBEEF2A")).unwrap_err();
    assert!(matches!(err, HexError::TrailingBytes(4)));
}

#[test]
fn test_line_layer() {
    for v in VALID {
        let line = format!(":{}", v.hex);
        let record = decode_line(line.as_bytes()).unwrap();
        assert_eq!(record.record_type, v.record_type);

        let lower = line.to_ascii_lowercase();
        assert_eq!(decode_line(lower.as_bytes()).unwrap(), record);
    }
}
