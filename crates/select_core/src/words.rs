//! Word and line range detection for double/triple-click gestures.

use crate::text::{codepoints, is_word_boundary};

/// Codepoint range `(start, end)` of the word-or-boundary run around
/// `char_index` in one line.
///
/// The character at `char_index` (or the last character of the line
/// when the index sits at end-of-line) determines the class — word or
/// boundary, per [`is_word_boundary`] — and the range grows in both
/// directions while the class matches, stopping exactly at the first
/// class change or buffer edge. Double-clicking whitespace therefore
/// selects the whitespace run, matching the classic word-select feel.
pub fn word_range_at(line: &[u8], char_index: usize) -> (usize, usize) {
    let chars: Vec<char> = codepoints(line).map(|(_, ch)| ch).collect();
    let n = chars.len();
    if n == 0 {
        return (0, 0);
    }

    let idx = char_index.min(n);
    let probe = if idx < n { chars[idx] } else { chars[n - 1] };
    let class = is_word_boundary(probe);

    // Scan left while the class matches, inclusive of the start char.
    let mut start = idx.min(n - 1);
    while start > 0 && is_word_boundary(chars[start - 1]) == class {
        start -= 1;
    }

    // Scan right from the clicked index until the class flips or the
    // line ends.
    let mut end = idx;
    while end < n && is_word_boundary(chars[end]) == class {
        end += 1;
    }

    (start.min(end), end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_at_start_of_line() {
        // "o" in "foo"
        assert_eq!(word_range_at(b"foo bar", 2), (0, 3));
        assert_eq!(word_range_at(b"foo bar", 0), (0, 3));
    }

    #[test]
    fn word_after_space() {
        // "b" in "bar"
        assert_eq!(word_range_at(b"foo bar", 4), (4, 7));
        assert_eq!(word_range_at(b"foo bar", 6), (4, 7));
    }

    #[test]
    fn boundary_run_is_its_own_word() {
        // Clicking the space selects the boundary run.
        assert_eq!(word_range_at(b"foo  bar", 3), (3, 5));
        assert_eq!(word_range_at(b"a, b", 1), (1, 3)); // ", "
    }

    #[test]
    fn click_at_end_of_line_uses_last_char() {
        assert_eq!(word_range_at(b"foo bar", 7), (4, 7));
        assert_eq!(word_range_at(b"foo ", 4), (3, 4)); // trailing space run
    }

    #[test]
    fn empty_line_selects_nothing() {
        assert_eq!(word_range_at(b"", 0), (0, 0));
        assert_eq!(word_range_at(b"", 5), (0, 0));
    }

    #[test]
    fn multibyte_word() {
        let line = "héllo wörld".as_bytes();
        assert_eq!(word_range_at(line, 1), (0, 5));
        assert_eq!(word_range_at(line, 8), (6, 11));
    }
}
