//! Record encoding

use crate::constants::{EXTENDED_ADDRESS_LEN, RECORD_OVERHEAD, START_CODE};
use crate::error::HexError;
use crate::types::Record;
use bytes::{BufMut, Bytes, BytesMut};

/// Two's-complement checksum: the byte that makes the sum of `bytes` and itself zero
pub fn checksum(bytes: &[u8]) -> u8 {
    0u8.wrapping_sub(bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b)))
}

/// Encode a record into its raw bytes
///
/// Layout:
/// 1. Byte count (1 byte)
/// 2. Address (2 bytes, big-endian)
/// 3. Record type (1 byte)
/// 4. Data (byte count bytes)
/// 5. Checksum (1 byte), computed over fields 1-4 as written
///
/// The record's own `checksum` field is not consulted.
pub fn encode_record(record: &Record) -> Result<Bytes, HexError> {
    if record.data.len() != record.byte_count as usize {
        return Err(HexError::ByteCountMismatch {
            byte_count: record.byte_count,
            data_len: record.data.len(),
        });
    }

    if record.record_type.is_extended_address() && record.byte_count != EXTENDED_ADDRESS_LEN {
        return Err(HexError::BadAddressRecordLength {
            record_type: record.record_type,
            byte_count: record.byte_count,
        });
    }

    let mut buf = BytesMut::with_capacity(RECORD_OVERHEAD + record.data.len());

    buf.put_u8(record.byte_count);
    buf.put_u16(record.address);
    buf.put_u8(record.record_type.as_u8());
    buf.put_slice(&record.data);

    let sum = checksum(&buf);
    buf.put_u8(sum);

    Ok(buf.freeze())
}

/// Encode a record as one line of text: start code plus uppercase hex, no line ending
pub fn encode_line(record: &Record) -> Result<String, HexError> {
    let raw = encode_record(record)?;
    let mut line = String::with_capacity(1 + raw.len() * 2);
    line.push(START_CODE as char);
    line.push_str(&hex::encode_upper(&raw));
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::EOF_LINE;
    use crate::types::{RecordType, EOF_RECORD};

    #[test]
    fn test_checksum() {
        let bytes = hex::decode("0300300002337A").unwrap();
        assert_eq!(checksum(&bytes), 0x1E);
        assert_eq!(checksum(&[]), 0x00);
    }

    #[test]
    fn test_encode_data_record() {
        let data = hex::decode("214601360121470136007EFE09D21901").unwrap();
        let record = Record::data(0x0100, data).unwrap();

        let encoded = encode_record(&record).unwrap();

        assert_eq!(
            hex::encode_upper(&encoded),
            "10010000214601360121470136007EFE09D2190140"
        );
    }

    #[test]
    fn test_encode_eof_line() {
        assert_eq!(encode_line(&EOF_RECORD).unwrap(), EOF_LINE);
    }

    #[test]
    fn test_encode_ignores_stale_checksum() {
        let mut record = Record::start_linear_address(0x0000_00CD);
        record.checksum = 0x00;

        assert_eq!(encode_line(&record).unwrap(), ":04000005000000CD2A");
    }

    #[test]
    fn test_encode_byte_count_mismatch() {
        let mut record = Record::data(0, vec![1, 2, 3]).unwrap();
        record.byte_count = 4;

        let result = encode_record(&record);
        assert!(matches!(
            result,
            Err(HexError::ByteCountMismatch {
                byte_count: 4,
                data_len: 3
            })
        ));
    }

    #[test]
    fn test_encode_extended_address_wrong_length() {
        let record = Record {
            byte_count: 3,
            address: 0,
            record_type: RecordType::ExtendedSegmentAddress,
            data: bytes::Bytes::from_static(&[0x12, 0x00, 0x00]),
            checksum: 0,
        };

        let err = encode_record(&record).unwrap_err();
        assert!(err.is_format());
    }
}
