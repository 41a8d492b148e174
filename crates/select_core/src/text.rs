//! UTF-8 codepoint utilities for selection handling.
//!
//! All positions in this crate are codepoint indices, not byte offsets,
//! so these helpers do the mapping between the two. Line content arrives
//! from the host as raw bytes; an invalid UTF-8 sequence truncates
//! decoding at the last good boundary instead of failing, so a damaged
//! line behaves like a shorter line.

/// Decode the next UTF-8 codepoint starting at byte offset `pos`.
///
/// Returns the decoded scalar and the offset just past it, or `None` at
/// end of input or on an invalid sequence. Callers must treat `None` as
/// "end of usable text".
///
/// # Examples
///
/// ```
/// use select_core::text::decode_next;
///
/// let s = "a€".as_bytes();
/// assert_eq!(decode_next(s, 0), Some(('a', 1)));
/// assert_eq!(decode_next(s, 1), Some(('€', 4)));
/// assert_eq!(decode_next(s, 4), None); // end of input
/// assert_eq!(decode_next(&[0xFF], 0), None); // invalid lead byte
/// ```
pub fn decode_next(bytes: &[u8], pos: usize) -> Option<(char, usize)> {
    let first = *bytes.get(pos)?;
    let len = match first {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return None,
    };
    let end = pos.checked_add(len)?;
    let slice = bytes.get(pos..end)?;
    let s = std::str::from_utf8(slice).ok()?;
    let ch = s.chars().next()?;
    Some((ch, end))
}

/// Iterator over `(byte_offset, char)` pairs of a byte string.
///
/// Stops at the first invalid UTF-8 sequence.
pub struct Codepoints<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Iterator for Codepoints<'_> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<Self::Item> {
        let (ch, next) = decode_next(self.bytes, self.pos)?;
        let start = self.pos;
        self.pos = next;
        Some((start, ch))
    }
}

/// Iterate the codepoints of `bytes`, stopping at invalid UTF-8.
pub fn codepoints(bytes: &[u8]) -> Codepoints<'_> {
    Codepoints { bytes, pos: 0 }
}

/// Count the codepoints in `bytes` (valid prefix only).
///
/// # Examples
///
/// ```
/// use select_core::text::codepoint_count;
///
/// assert_eq!(codepoint_count(b"abc"), 3);
/// assert_eq!(codepoint_count("héllo".as_bytes()), 5);
/// assert_eq!(codepoint_count(b""), 0);
/// ```
pub fn codepoint_count(bytes: &[u8]) -> usize {
    codepoints(bytes).count()
}

/// Byte offset of the `char_index`-th codepoint boundary.
///
/// Clamped to the end of the valid prefix when `char_index` exceeds the
/// codepoint count.
///
/// # Examples
///
/// ```
/// use select_core::text::byte_offset_at;
///
/// let s = "a€b".as_bytes();
/// assert_eq!(byte_offset_at(s, 0), 0);
/// assert_eq!(byte_offset_at(s, 1), 1);
/// assert_eq!(byte_offset_at(s, 2), 4);
/// assert_eq!(byte_offset_at(s, 3), 5);
/// assert_eq!(byte_offset_at(s, 100), 5);
/// ```
pub fn byte_offset_at(bytes: &[u8], char_index: usize) -> usize {
    let mut pos = 0;
    let mut seen = 0;
    while seen < char_index {
        let Some((_, next)) = decode_next(bytes, pos) else {
            break;
        };
        pos = next;
        seen += 1;
    }
    pos
}

/// Byte length of the longest decodable prefix of `bytes`.
pub fn valid_prefix_len(bytes: &[u8]) -> usize {
    byte_offset_at(bytes, usize::MAX)
}

/// Word-boundary classification used for double-click word selection.
///
/// Matches a fixed set of ranges covering ASCII/Latin punctuation and
/// whitespace blocks. This is deliberately *not* full Unicode word
/// segmentation; the ranges are a heuristic that works well for Latin
/// text, and broadening them would change observable double-click
/// behavior.
///
/// # Examples
///
/// ```
/// use select_core::text::is_word_boundary;
///
/// assert!(is_word_boundary(' '));
/// assert!(is_word_boundary(','));
/// assert!(is_word_boundary('['));
/// assert!(!is_word_boundary('a'));
/// assert!(!is_word_boundary('é'));
/// ```
pub fn is_word_boundary(c: char) -> bool {
    const RANGES: [(u32, u32); 4] = [(0x20, 0x2F), (0x3A, 0x40), (0x5B, 0x60), (0x7B, 0xBF)];
    let c = c as u32;
    RANGES.iter().any(|&(lo, hi)| c >= lo && c <= hi)
}
