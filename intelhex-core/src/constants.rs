//! Constants and limits for the Intel HEX record format

/// Start code every non-blank line begins with
pub const START_CODE: u8 = b':';

/// Number of distinct record types (valid type bytes are `0..RECORD_TYPE_COUNT`)
pub const RECORD_TYPE_COUNT: u8 = 0x06;

/// Fixed bytes around the data field: count (1) + address (2) + type (1) + checksum (1)
pub const RECORD_OVERHEAD: usize = 5;

/// Largest payload a single record can carry (the count field is one byte)
pub const MAX_DATA_LEN: usize = u8::MAX as usize;

/// Payload size of extended segment / extended linear address records
pub const EXTENDED_ADDRESS_LEN: u8 = 2;

/// Payload size of start segment / start linear address records
pub const START_ADDRESS_LEN: usize = 4;

/// Default number of data bytes per record when writing
pub const DEFAULT_RECORD_SIZE: usize = 16;

/// Filler byte for gaps between segments in a flat image
pub const DEFAULT_FILL_BYTE: u8 = 0xFF;

/// Text form of the end-of-file record
pub const EOF_LINE: &str = ":00000001FF";
