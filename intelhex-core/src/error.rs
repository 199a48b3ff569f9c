//! Error types for Intel HEX operations

use crate::types::RecordType;
use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Record fields, in wire order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// 1-byte data length
    ByteCount,
    /// 2-byte big-endian load offset
    Address,
    /// 1-byte record type
    RecordType,
    /// Payload bytes
    Data,
    /// 1-byte two's-complement checksum
    Checksum,
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Field::ByteCount => "byte count",
            Field::Address => "address",
            Field::RecordType => "record type",
            Field::Data => "data",
            Field::Checksum => "checksum",
        };
        f.write_str(name)
    }
}

/// Coarse classification of a [`HexError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Stored and calculated checksums differ
    Checksum,
    /// Record type byte outside the known range
    InvalidRecordType,
    /// Malformed layout, text or stream structure
    Format,
    /// Failure of the underlying line source
    Io,
}

/// Errors that can occur while decoding, scanning or encoding Intel HEX
///
/// Cloning is cheap; an I/O error is shared behind an `Arc`.
#[derive(Debug, Clone, Error)]
pub enum HexError {
    /// Checksum mismatch
    #[error("expected checksum 0x{expected:02X} but calculated 0x{calculated:02X}")]
    Checksum {
        /// The checksum stored in the record.
        expected: u8,
        /// The checksum computed over the record bytes.
        calculated: u8,
    },

    /// Record type byte is not one of the six known kinds
    #[error("invalid record type 0x{0:02X}")]
    InvalidRecordType(u8),

    /// Input ended while a field was being read
    #[error("unexpected end of record while decoding {field} field")]
    UnexpectedEnd {
        /// The field that could not be read.
        field: Field,
    },

    /// Extended address records must carry exactly two bytes
    #[error("expected {record_type} record to have byte count of 0x02 but got 0x{byte_count:02X}")]
    BadAddressRecordLength {
        /// The offending record type.
        record_type: RecordType,
        /// The declared byte count.
        byte_count: u8,
    },

    /// Bytes left over after the checksum field
    #[error("unexpected {0} trailing bytes after checksum")]
    TrailingBytes(usize),

    /// Declared byte count disagrees with the payload
    #[error("byte count was {byte_count} but data length was {data_len}")]
    ByteCountMismatch {
        /// The declared byte count.
        byte_count: u8,
        /// The actual payload length.
        data_len: usize,
    },

    /// Payload does not fit in a single record
    #[error("data length {0} exceeds the 255 byte record limit")]
    DataTooLong(usize),

    /// Requested record size outside 1..=255
    #[error("record size {0} must be between 1 and 255")]
    InvalidRecordSize(usize),

    /// Line does not begin with ':'
    #[error("expected start code ':' but got {}", describe_start(.0))]
    BadStartCode(Option<u8>),

    /// Hex text after the start code is malformed
    #[error("invalid hex text: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Line source ran out before an end-of-file record
    #[error("unexpected end of stream: missing end-of-file record")]
    MissingEof,

    /// IO error from the line source
    #[error("IO error: {0}")]
    Io(#[source] Arc<io::Error>),
}

impl From<io::Error> for HexError {
    fn from(e: io::Error) -> Self {
        HexError::Io(Arc::new(e))
    }
}

fn describe_start(found: &Option<u8>) -> String {
    match found {
        Some(b) if b.is_ascii_graphic() => format!("'{}'", *b as char),
        Some(b) => format!("0x{:02X}", b),
        None => "an empty line".to_string(),
    }
}

impl HexError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            HexError::Checksum { .. } => ErrorKind::Checksum,
            HexError::InvalidRecordType(_) => ErrorKind::InvalidRecordType,
            HexError::Io(_) => ErrorKind::Io,
            _ => ErrorKind::Format,
        }
    }

    /// True if the error was caused by a checksum mismatch
    pub fn is_checksum(&self) -> bool {
        self.kind() == ErrorKind::Checksum
    }

    /// True if the error was caused by an unsupported record type
    pub fn is_invalid_record_type(&self) -> bool {
        self.kind() == ErrorKind::InvalidRecordType
    }

    /// True for structural and text errors
    pub fn is_format(&self) -> bool {
        self.kind() == ErrorKind::Format
    }
}
