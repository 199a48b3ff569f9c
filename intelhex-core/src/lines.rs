//! Line sources for the scanner

use std::io::{self, BufRead};

/// Lines of an in-memory buffer, split on `\n`
///
/// Never fails; the `io::Result` item type matches the scanner's line source contract.
#[derive(Debug, Clone)]
pub struct SliceLines<'a> {
    rest: &'a [u8],
}

impl<'a> SliceLines<'a> {
    /// Split `data` into lines
    pub fn new(data: &'a [u8]) -> Self {
        Self { rest: data }
    }
}

impl<'a> Iterator for SliceLines<'a> {
    type Item = io::Result<&'a [u8]>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        match memchr::memchr(b'\n', self.rest) {
            Some(pos) => {
                let line = &self.rest[..pos];
                self.rest = &self.rest[pos + 1..];
                Some(Ok(line))
            }
            None => {
                let line = self.rest;
                self.rest = &[];
                Some(Ok(line))
            }
        }
    }
}

/// Lines of a buffered reader, split on `\n`
pub fn reader_lines<R: BufRead>(reader: R) -> io::Split<R> {
    reader.split(b'\n')
}

/// Drop a trailing `\r` left by CRLF line endings
pub(crate) fn trim_line_ending(line: &[u8]) -> &[u8] {
    match line.last() {
        Some(b'\r') => &line[..line.len() - 1],
        _ => line,
    }
}
