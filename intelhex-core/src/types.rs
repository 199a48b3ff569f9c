//! Core types for Intel HEX records and segments

use crate::constants::{EXTENDED_ADDRESS_LEN, MAX_DATA_LEN};
use crate::encoder::checksum;
use crate::error::HexError;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Record kinds; the discriminant is the wire byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RecordType {
    /// Payload bytes at `address` within the current bank
    Data = 0x00,
    /// Terminates the stream
    EndOfFile = 0x01,
    /// 16-bit segment base, effective base is `value << 4`
    ExtendedSegmentAddress = 0x02,
    /// CS:IP start address
    StartSegmentAddress = 0x03,
    /// Upper 16 bits of the address, effective base is `value << 16`
    ExtendedLinearAddress = 0x04,
    /// 32-bit EIP start address
    StartLinearAddress = 0x05,
}

impl RecordType {
    /// Wire byte of this type
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether records of this type must carry exactly two data bytes
    pub const fn is_extended_address(self) -> bool {
        matches!(
            self,
            RecordType::ExtendedSegmentAddress | RecordType::ExtendedLinearAddress
        )
    }
}

impl TryFrom<u8> for RecordType {
    type Error = HexError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(RecordType::Data),
            0x01 => Ok(RecordType::EndOfFile),
            0x02 => Ok(RecordType::ExtendedSegmentAddress),
            0x03 => Ok(RecordType::StartSegmentAddress),
            0x04 => Ok(RecordType::ExtendedLinearAddress),
            0x05 => Ok(RecordType::StartLinearAddress),
            other => Err(HexError::InvalidRecordType(other)),
        }
    }
}

impl core::fmt::Display for RecordType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            RecordType::Data => "data",
            RecordType::EndOfFile => "end of file",
            RecordType::ExtendedSegmentAddress => "extended segment address",
            RecordType::StartSegmentAddress => "start segment address",
            RecordType::ExtendedLinearAddress => "extended linear address",
            RecordType::StartLinearAddress => "start linear address",
        };
        f.write_str(name)
    }
}

/// One decoded line of the wire format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Declared payload length
    pub byte_count: u8,

    /// 16-bit offset within the current bank
    pub address: u16,

    /// Record kind
    pub record_type: RecordType,

    /// Payload, `byte_count` bytes long
    pub data: Bytes,

    /// Two's-complement checksum of the preceding fields
    pub checksum: u8,
}

/// The end-of-file record, used as the stream terminator when writing
pub const EOF_RECORD: Record = Record {
    byte_count: 0,
    address: 0,
    record_type: RecordType::EndOfFile,
    data: Bytes::new(),
    checksum: 0xFF,
};

impl Record {
    /// Build a record, deriving the byte count and checksum from its fields
    pub fn new(
        record_type: RecordType,
        address: u16,
        data: impl Into<Bytes>,
    ) -> Result<Self, HexError> {
        let data = data.into();
        if data.len() > MAX_DATA_LEN {
            return Err(HexError::DataTooLong(data.len()));
        }
        let byte_count = data.len() as u8;

        if record_type.is_extended_address() && byte_count != EXTENDED_ADDRESS_LEN {
            return Err(HexError::BadAddressRecordLength {
                record_type,
                byte_count,
            });
        }

        let mut record = Self {
            byte_count,
            address,
            record_type,
            data,
            checksum: 0,
        };
        record.checksum = record.compute_checksum();
        Ok(record)
    }

    /// Data record at a 16-bit offset
    pub fn data(address: u16, data: impl Into<Bytes>) -> Result<Self, HexError> {
        Self::new(RecordType::Data, address, data)
    }

    /// Extended segment address record (base = `segment << 4`)
    pub fn extended_segment_address(segment: u16) -> Self {
        Self::fixed(
            RecordType::ExtendedSegmentAddress,
            Bytes::copy_from_slice(&segment.to_be_bytes()),
        )
    }

    /// Extended linear address record (base = `upper << 16`)
    pub fn extended_linear_address(upper: u16) -> Self {
        Self::fixed(
            RecordType::ExtendedLinearAddress,
            Bytes::copy_from_slice(&upper.to_be_bytes()),
        )
    }

    /// Start segment address record
    pub fn start_segment_address(cs: u16, ip: u16) -> Self {
        let mut word = [0u8; 4];
        word[..2].copy_from_slice(&cs.to_be_bytes());
        word[2..].copy_from_slice(&ip.to_be_bytes());
        Self::fixed(RecordType::StartSegmentAddress, Bytes::copy_from_slice(&word))
    }

    /// Start linear address record
    pub fn start_linear_address(eip: u32) -> Self {
        Self::fixed(
            RecordType::StartLinearAddress,
            Bytes::copy_from_slice(&eip.to_be_bytes()),
        )
    }

    // Payloads of 2 or 4 bytes: the length checks in `new` cannot fail.
    fn fixed(record_type: RecordType, data: Bytes) -> Self {
        let mut record = Self {
            byte_count: data.len() as u8,
            address: 0,
            record_type,
            data,
            checksum: 0,
        };
        record.checksum = record.compute_checksum();
        record
    }

    /// Checksum over the count, address, type and data fields as they are now
    pub fn compute_checksum(&self) -> u8 {
        let [hi, lo] = self.address.to_be_bytes();
        let header = [self.byte_count, hi, lo, self.record_type.as_u8()];
        checksum(&header).wrapping_add(checksum(&self.data))
    }

    /// The 16-bit value of an extended address record's payload
    pub fn extended_address_value(&self) -> Option<u16> {
        if !self.record_type.is_extended_address() || self.data.len() != 2 {
            return None;
        }
        Some(u16::from_be_bytes([self.data[0], self.data[1]]))
    }
}

/// A resolved, absolutely addressed run of bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Absolute address of the first byte
    pub address: u32,

    /// Payload
    pub data: Bytes,
}

impl Segment {
    /// Create a new segment
    pub fn new(address: u32, data: impl Into<Bytes>) -> Self {
        Self {
            address,
            data: data.into(),
        }
    }

    /// Number of payload bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the segment carries no bytes
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Address one past the last byte
    pub fn end(&self) -> u64 {
        self.address as u64 + self.data.len() as u64
    }
}

/// Execution start address announced by a start-address record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartAddress {
    /// 80x86 real-mode CS:IP
    Segmented {
        /// Code segment.
        cs: u16,
        /// Instruction pointer.
        ip: u16,
    },
    /// 32-bit EIP
    Linear(u32),
}

/// Address extension in effect for subsequent data records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressBase {
    /// No extension record seen yet
    #[default]
    None,
    /// Set by an extended segment address record (already shifted left by 4)
    Segmented(u32),
    /// Set by an extended linear address record (already shifted left by 16)
    Linear(u32),
}

impl AddressBase {
    /// Base added to a data record's 16-bit offset
    pub const fn offset(self) -> u32 {
        match self {
            AddressBase::None => 0,
            AddressBase::Segmented(base) | AddressBase::Linear(base) => base,
        }
    }

    /// Absolute address of a data record offset under this base
    pub const fn resolve(self, address: u16) -> u32 {
        self.offset().wrapping_add(address as u32)
    }
}
