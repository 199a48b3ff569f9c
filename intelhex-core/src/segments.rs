//! Segment collections: ordering, span and re-serialization to HEX text

use crate::constants::MAX_DATA_LEN;
use crate::encoder::encode_line;
use crate::error::HexError;
use crate::types::{Record, Segment, EOF_RECORD};
use bytes::Bytes;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[cfg(feature = "logging")]
use tracing::debug;

/// An owned, growable set of segments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentList {
    segments: Vec<Segment>,
}

impl SegmentList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap existing segments without reordering them
    pub fn from_vec(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Chunk a flat image starting at `base` into segments of at most `record_size` bytes
    pub fn from_image(
        base: u32,
        image: impl Into<Bytes>,
        record_size: usize,
    ) -> Result<Self, HexError> {
        if record_size == 0 || record_size > MAX_DATA_LEN {
            return Err(HexError::InvalidRecordSize(record_size));
        }

        let image = image.into();
        let mut segments = Vec::with_capacity(image.len().div_ceil(record_size));
        let mut offset = 0;
        while offset < image.len() {
            let end = (offset + record_size).min(image.len());
            segments.push(Segment::new(
                base.wrapping_add(offset as u32),
                image.slice(offset..end),
            ));
            offset = end;
        }

        Ok(Self { segments })
    }

    /// Append a segment
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True if there are no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over the segments in their stored order
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Segments as a slice
    pub fn as_slice(&self) -> &[Segment] {
        &self.segments
    }

    /// Consume the list
    pub fn into_vec(self) -> Vec<Segment> {
        self.segments
    }

    /// Sort by ascending address; equal addresses keep their relative order
    pub fn sort(&mut self) {
        self.segments.sort_by_key(|s| s.address);
    }

    /// Bytes covered from the first segment's start to the last segment's end
    ///
    /// Assumes ascending, non-overlapping order, so call [`SegmentList::sort`] first.
    /// An unsorted list whose last segment ends before the first one starts
    /// has a span of 0.
    pub fn span(&self) -> u64 {
        match self.segments.as_slice() {
            [] => 0,
            [only] => only.len() as u64,
            [first, .., last] => last.end().saturating_sub(first.address as u64),
        }
    }

    /// Serialize as HEX text: one line per record, ending with the end-of-file record
    ///
    /// Segments are written in address order. An extended linear address
    /// record precedes the first segment of every 64 KiB bank other than
    /// bank zero; data records carry the low 16 address bits.
    pub fn write_to<W: Write>(&self, mut w: W) -> Result<(), HexError> {
        let mut ordered: Vec<&Segment> = self.segments.iter().collect();
        ordered.sort_by_key(|s| s.address);

        let mut bank: u32 = 0;

        for segment in ordered {
            let upper = segment.address >> 16;
            if upper != bank {
                bank = upper;
                write_record(&mut w, &Record::extended_linear_address(upper as u16))?;
            }

            let record = Record::data((segment.address & 0xFFFF) as u16, segment.data.clone())?;
            write_record(&mut w, &record)?;
        }

        write_record(&mut w, &EOF_RECORD)?;
        w.flush()?;

        #[cfg(feature = "logging")]
        debug!("Wrote {} segments plus end-of-file record", self.segments.len());

        Ok(())
    }

    /// Serialize as a HEX string
    pub fn to_hex_string(&self) -> Result<String, HexError> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        // Output is ASCII hex digits, ':' and '\n' only
        String::from_utf8(out)
            .map_err(|e| HexError::from(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// Serialize to a file, replacing it if it exists
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<(), HexError> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))
    }
}

fn write_record<W: Write>(w: &mut W, record: &Record) -> Result<(), HexError> {
    let line = encode_line(record)?;
    w.write_all(line.as_bytes())?;
    w.write_all(b"\n")?;
    Ok(())
}

impl From<Vec<Segment>> for SegmentList {
    fn from(segments: Vec<Segment>) -> Self {
        Self::from_vec(segments)
    }
}

impl FromIterator<Segment> for SegmentList {
    fn from_iter<T: IntoIterator<Item = Segment>>(iter: T) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for SegmentList {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl<'a> IntoIterator for &'a SegmentList {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
