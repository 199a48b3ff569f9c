//! Streaming scanner: HEX lines in, absolutely addressed segments out

use crate::constants::START_ADDRESS_LEN;
use crate::decoder::decode_line;
use crate::error::HexError;
use crate::lines::{reader_lines, trim_line_ending, SliceLines};
use crate::segments::SegmentList;
use crate::types::{AddressBase, Record, RecordType, Segment, StartAddress};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead};

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// Scan statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Lines pulled from the source
    pub lines_read: usize,

    /// Zero-length lines skipped
    pub blank_lines: usize,

    /// Records successfully decoded
    pub records: usize,

    /// Data records (one segment each)
    pub data_records: usize,

    /// Payload bytes emitted in segments
    pub data_bytes: usize,

    /// Extended segment / linear address records
    pub extended_address_records: usize,

    /// Start segment / linear address records
    pub start_address_records: usize,
}

#[derive(Debug)]
enum State {
    Scanning,
    Finished,
    Failed(HexError),
}

/// Pull-based scanner over a line source
///
/// The source is any iterator of `io::Result` lines; a trailing `\r` on
/// each line is ignored. Blank lines are skipped. The stream must end with
/// an end-of-file record; running out of lines first is an error.
///
/// Errors are terminal: once one is stored, [`Scanner::advance`] keeps
/// returning `false` and [`Scanner::err`] keeps returning it.
///
/// `Scanner` is also an iterator of `Result<Segment, HexError>` that yields
/// a copy of the terminal error once and then ends. [`Scanner::err`] still
/// reports it afterwards.
#[derive(Debug)]
pub struct Scanner<I> {
    lines: I,
    base: AddressBase,
    start_address: Option<StartAddress>,
    segment: Option<Segment>,
    state: State,
    error_yielded: bool,
    stats: ScanStats,
}

impl<I, L> Scanner<I>
where
    I: Iterator<Item = io::Result<L>>,
    L: AsRef<[u8]>,
{
    /// Create a scanner over a line source
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            base: AddressBase::None,
            start_address: None,
            segment: None,
            state: State::Scanning,
            error_yielded: false,
            stats: ScanStats::default(),
        }
    }

    /// Advance to the next segment
    ///
    /// Returns `true` when [`Scanner::segment`] holds a new segment, and
    /// `false` on the end-of-file record or on error (see [`Scanner::err`]).
    pub fn advance(&mut self) -> bool {
        self.segment = None;

        if !matches!(self.state, State::Scanning) {
            return false;
        }

        match self.read_segment() {
            Ok(Some(segment)) => {
                self.segment = Some(segment);
                true
            }
            Ok(None) => {
                #[cfg(feature = "logging")]
                debug!(
                    "Scan complete: {} segments, {} bytes from {} lines",
                    self.stats.data_records, self.stats.data_bytes, self.stats.lines_read
                );

                self.state = State::Finished;
                false
            }
            Err(e) => {
                #[cfg(feature = "logging")]
                warn!("Scan failed at line {}: {}", self.stats.lines_read, e);

                self.state = State::Failed(e);
                false
            }
        }
    }

    fn read_segment(&mut self) -> Result<Option<Segment>, HexError> {
        while let Some(line) = self.lines.next() {
            let line = line?;
            self.stats.lines_read += 1;

            let line = trim_line_ending(line.as_ref());
            if line.is_empty() {
                self.stats.blank_lines += 1;
                continue;
            }

            let record = decode_line(line)?;
            self.stats.records += 1;

            match record.record_type {
                RecordType::Data => {
                    let segment = Segment {
                        address: self.base.resolve(record.address),
                        data: record.data,
                    };
                    self.stats.data_records += 1;
                    self.stats.data_bytes += segment.len();
                    return Ok(Some(segment));
                }
                RecordType::EndOfFile => return Ok(None),
                RecordType::ExtendedSegmentAddress | RecordType::ExtendedLinearAddress => {
                    self.set_base(&record)?;
                }
                RecordType::StartSegmentAddress | RecordType::StartLinearAddress => {
                    self.record_start_address(&record);
                }
            }
        }

        Err(HexError::MissingEof)
    }

    fn set_base(&mut self, record: &Record) -> Result<(), HexError> {
        let value = record
            .extended_address_value()
            .ok_or(HexError::BadAddressRecordLength {
                record_type: record.record_type,
                byte_count: record.byte_count,
            })? as u32;

        self.base = match record.record_type {
            RecordType::ExtendedSegmentAddress => AddressBase::Segmented(value << 4),
            _ => AddressBase::Linear(value << 16),
        };
        self.stats.extended_address_records += 1;

        #[cfg(feature = "logging")]
        debug!("Address base set to {:?}", self.base);

        Ok(())
    }

    fn record_start_address(&mut self, record: &Record) {
        self.stats.start_address_records += 1;

        if record.data.len() != START_ADDRESS_LEN {
            #[cfg(feature = "logging")]
            warn!(
                "Ignoring {} record with {} data bytes",
                record.record_type,
                record.data.len()
            );
            return;
        }

        let d = &record.data;
        self.start_address = Some(match record.record_type {
            RecordType::StartSegmentAddress => StartAddress::Segmented {
                cs: u16::from_be_bytes([d[0], d[1]]),
                ip: u16::from_be_bytes([d[2], d[3]]),
            },
            _ => StartAddress::Linear(u32::from_be_bytes([d[0], d[1], d[2], d[3]])),
        });
    }

    /// The segment produced by the last successful [`Scanner::advance`]
    pub fn segment(&self) -> Option<&Segment> {
        self.segment.as_ref()
    }

    /// The terminal error, if scanning failed
    pub fn err(&self) -> Option<&HexError> {
        match &self.state {
            State::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// True once the end-of-file record has been read
    pub fn is_finished(&self) -> bool {
        matches!(self.state, State::Finished)
    }

    /// Address extension currently in effect
    pub fn address_base(&self) -> AddressBase {
        self.base
    }

    /// Last start address seen, if any
    pub fn start_address(&self) -> Option<StartAddress> {
        self.start_address
    }

    /// Counters for the lines consumed so far
    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }
}

impl<R: BufRead> Scanner<io::Split<R>> {
    /// Scan lines read from `reader`
    pub fn from_reader(reader: R) -> Self {
        Scanner::new(reader_lines(reader))
    }
}

impl<'a> Scanner<SliceLines<'a>> {
    /// Scan an in-memory HEX text
    pub fn from_slice(data: &'a [u8]) -> Self {
        Scanner::new(SliceLines::new(data))
    }
}

impl<I, L> Iterator for Scanner<I>
where
    I: Iterator<Item = io::Result<L>>,
    L: AsRef<[u8]>,
{
    type Item = Result<Segment, HexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.advance() {
            return self.segment.take().map(Ok);
        }

        match &self.state {
            State::Failed(e) if !self.error_yielded => {
                self.error_yielded = true;
                Some(Err(e.clone()))
            }
            _ => None,
        }
    }
}

/// Read every segment from `reader`, in file order
pub fn read_segments<R: BufRead>(reader: R) -> Result<SegmentList, HexError> {
    Scanner::from_reader(reader).collect()
}

/// Parse every segment from a HEX text, in file order
pub fn parse_str(text: &str) -> Result<SegmentList, HexError> {
    Scanner::from_slice(text.as_bytes()).collect()
}
