use crate::models::ByteRange;
use crate::utils::constants::LINE_TERMINATOR;

/// Split `buffer` into at most `partitions` contiguous, line-aligned ranges.
///
/// Each boundary is placed just after the first line terminator at or past
/// the next stride of `len / partitions` bytes, so no record straddles two
/// ranges. The ranges cover `[0, len)` exactly; an empty buffer yields the
/// single range `[0, 0)`.
pub fn partition(buffer: &[u8], partitions: usize) -> Vec<ByteRange> {
    let len = buffer.len();
    if len == 0 {
        return vec![ByteRange::new(0, 0)];
    }

    let partitions = partitions.max(1);
    let stride = match len / partitions {
        0 => len,
        stride => stride,
    };

    let mut ranges = Vec::with_capacity(partitions);
    let mut start = 0;
    while start < len {
        let scan_from = start + stride;
        let end = if scan_from >= len {
            len
        } else {
            match memchr::memchr(LINE_TERMINATOR, &buffer[scan_from..]) {
                Some(pos) => scan_from + pos + 1,
                None => len,
            }
        };

        ranges.push(ByteRange::new(start, end));
        start = end;
    }

    ranges
}
