//! # Intel HEX Core
//!
//! Decoding, validation and re-encoding of the Intel HEX text format.
//!
//! ## Modules
//!
//! - `constants`: Record format constants and limits
//! - `types`: Core types (Record, RecordType, Segment, AddressBase)
//! - `encoder`: Checksum and record encoding
//! - `decoder`: Strict record decoding
//! - `lines`: Line sources for the scanner
//! - `scanner`: Streaming HEX-to-segment scanner
//! - `segments`: Segment ordering, span and HEX writer

#![warn(missing_docs)]

pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod lines;
pub mod scanner;
pub mod segments;
pub mod types;

// Re-export commonly used types
pub use error::{ErrorKind, HexError};
pub use scanner::{parse_str, read_segments, ScanStats, Scanner};
pub use segments::SegmentList;
pub use types::{AddressBase, Record, RecordType, Segment, StartAddress, EOF_RECORD};

/// Result type alias for Intel HEX operations
pub type Result<T> = core::result::Result<T, HexError>;
