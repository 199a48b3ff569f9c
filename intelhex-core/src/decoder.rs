//! Record decoding (strict mode)

use crate::constants::{EXTENDED_ADDRESS_LEN, START_CODE};
use crate::encoder::checksum;
use crate::error::{Field, HexError};
use crate::types::{Record, RecordType};
use bytes::{Buf, Bytes};

/// Decode a record from its raw bytes
///
/// The input must hold exactly one record: `5 + byte_count` bytes.
/// Checks run in this order:
/// - every field can be read (empty input fails on the byte count)
/// - the record type is known
/// - extended address records carry two bytes
/// - nothing follows the checksum
/// - the checksum matches
pub fn decode_record(raw: &[u8]) -> Result<Record, HexError> {
    let mut buf = raw;

    let byte_count = read_u8(&mut buf, Field::ByteCount)?;

    if buf.remaining() < 2 {
        return Err(HexError::UnexpectedEnd {
            field: Field::Address,
        });
    }
    let address = buf.get_u16();

    let record_type = RecordType::try_from(read_u8(&mut buf, Field::RecordType)?)?;

    if record_type.is_extended_address() && byte_count != EXTENDED_ADDRESS_LEN {
        return Err(HexError::BadAddressRecordLength {
            record_type,
            byte_count,
        });
    }

    if buf.remaining() < byte_count as usize {
        return Err(HexError::UnexpectedEnd { field: Field::Data });
    }
    let data = Bytes::copy_from_slice(&buf[..byte_count as usize]);
    buf.advance(byte_count as usize);

    let stored = read_u8(&mut buf, Field::Checksum)?;

    if buf.has_remaining() {
        return Err(HexError::TrailingBytes(buf.remaining()));
    }

    let calculated = checksum(&raw[..raw.len() - 1]);
    if calculated != stored {
        return Err(HexError::Checksum {
            expected: stored,
            calculated,
        });
    }

    Ok(Record {
        byte_count,
        address,
        record_type,
        data,
        checksum: stored,
    })
}

/// Decode one line of text: start code followed by hex digits (either case)
///
/// The line must not carry its line ending.
pub fn decode_line(line: &[u8]) -> Result<Record, HexError> {
    match line.first() {
        Some(&START_CODE) => {}
        other => return Err(HexError::BadStartCode(other.copied())),
    }

    let raw = hex::decode(&line[1..])?;
    decode_record(&raw)
}

fn read_u8(buf: &mut &[u8], field: Field) -> Result<u8, HexError> {
    if !buf.has_remaining() {
        return Err(HexError::UnexpectedEnd { field });
    }
    Ok(buf.get_u8())
}
