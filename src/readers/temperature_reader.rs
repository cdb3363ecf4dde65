use crate::error::{ProcessingError, RecordError, Result};
use crate::models::ByteRange;
use crate::utils::constants::{DECIMAL_POINT, FIELD_DELIMITER, LINE_TERMINATOR, MINUS_SIGN};
use std::iter::FusedIterator;

/// One `<station>;<temperature>` line, borrowed from the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub station: &'a [u8],
    pub tenths: i16,
}

/// True when `digits` ends the buffer partway through a `D.D` or `DD.D`
/// shape: every byte present is valid for its position.
fn is_incomplete_shape(digits: &[u8]) -> bool {
    match digits {
        [] => true,
        [d0] => d0.is_ascii_digit(),
        [d0, d1] => d0.is_ascii_digit() && (*d1 == DECIMAL_POINT || d1.is_ascii_digit()),
        [d0, d1, DECIMAL_POINT] => d0.is_ascii_digit() && d1.is_ascii_digit(),
        _ => false,
    }
}

#[inline]
fn digit(byte: u8) -> std::result::Result<i16, RecordError> {
    if byte.is_ascii_digit() {
        Ok((byte - b'0') as i16)
    } else {
        Err(RecordError::MalformedTemperature)
    }
}

/// Parse a leading `-?D.D` or `-?DD.D` temperature into tenths of a degree.
///
/// The decimal point may only sit at offset 1 or 2 after the optional sign,
/// so the digits are read from fixed positions once the shape is known.
/// Returns the value and the number of bytes consumed, including the line
/// terminator when one follows.
#[inline]
pub fn parse_temperature(bytes: &[u8]) -> std::result::Result<(i16, usize), RecordError> {
    let (negative, digits) = match bytes {
        [MINUS_SIGN, rest @ ..] => (true, rest),
        _ => (false, bytes),
    };

    let (magnitude, width) = match digits {
        [ones, DECIMAL_POINT, frac, ..] => (digit(*ones)? * 10 + digit(*frac)?, 3),
        [tens, ones, DECIMAL_POINT, frac, ..] => {
            (digit(*tens)? * 100 + digit(*ones)? * 10 + digit(*frac)?, 4)
        }
        _ if is_incomplete_shape(digits) => return Err(RecordError::Truncated),
        _ => return Err(RecordError::MalformedTemperature),
    };

    let value = if negative { -magnitude } else { magnitude };
    let consumed = negative as usize + width;

    match bytes.get(consumed) {
        None => Ok((value, consumed)),
        Some(&LINE_TERMINATOR) => Ok((value, consumed + 1)),
        Some(_) => Err(RecordError::MissingTerminator),
    }
}

#[inline]
fn read_record(rest: &[u8]) -> std::result::Result<(Record<'_>, usize), RecordError> {
    let delimiter = match memchr::memchr2(FIELD_DELIMITER, LINE_TERMINATOR, rest) {
        Some(pos) if rest[pos] == FIELD_DELIMITER => pos,
        _ => return Err(RecordError::MissingDelimiter),
    };

    let (tenths, width) = parse_temperature(&rest[delimiter + 1..])?;

    Ok((
        Record {
            station: &rest[..delimiter],
            tenths,
        },
        delimiter + 1 + width,
    ))
}

/// Streams records out of one line-aligned slice of the input.
///
/// A malformed record yields a single [`ProcessingError::Parse`] carrying its
/// absolute offset in the input, after which the reader is exhausted.
pub struct RecordReader<'a> {
    data: &'a [u8],
    position: usize,
    base_offset: usize,
}

impl<'a> RecordReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_offset(data, 0)
    }

    pub fn with_offset(data: &'a [u8], base_offset: usize) -> Self {
        Self {
            data,
            position: 0,
            base_offset,
        }
    }

    pub fn for_range(buffer: &'a [u8], range: ByteRange) -> Self {
        Self::with_offset(range.slice(buffer), range.start)
    }
}

impl<'a> Iterator for RecordReader<'a> {
    type Item = Result<Record<'a>>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let data = self.data;
        let rest = &data[self.position..];
        if rest.is_empty() {
            return None;
        }

        match read_record(rest) {
            Ok((record, consumed)) => {
                self.position += consumed;
                Some(Ok(record))
            }
            Err(source) => {
                let offset = self.base_offset + self.position;
                self.position = data.len();
                Some(Err(ProcessingError::parse(offset, source)))
            }
        }
    }
}

impl FusedIterator for RecordReader<'_> {}
