//! Per-line width cache: cumulative pixel widths at each codepoint
//! boundary.
//!
//! The cache is a pure function of line content and styling. It is
//! rebuilt whenever the content it was built from could have changed;
//! the engine discards it between frames, so a stale cache can never
//! outlive the line that produced it.

use crate::host::{SelectionHost, StyleId, StyledSegment};
use crate::text::codepoints;

/// Monotonic prefix-sum array of character widths for one line.
///
/// Holds `codepoint_count + 1` entries; the first is always `0.0` and
/// the last is the full line width.
#[derive(Clone, Debug)]
pub struct WidthCache {
    positions: Vec<f32>,
}

impl WidthCache {
    /// Build the cache for a plain line, measuring one codepoint at a
    /// time with the host's default style.
    pub fn build(text: &[u8], mut measure: impl FnMut(&str) -> f32) -> Self {
        let mut positions = Vec::with_capacity(text.len() + 1);
        positions.push(0.0);

        let mut total = 0.0f32;
        for (_, ch) in codepoints(text) {
            let mut buf = [0u8; 4];
            let s = ch.encode_utf8(&mut buf);
            total += measure(s).max(0.0);
            positions.push(total);
        }

        Self { positions }
    }

    /// Build the cache for a styled line.
    ///
    /// Segments are measured as if concatenated into one line, switching
    /// the measurement style at each segment boundary. The result is one
    /// global prefix array spanning all segments.
    pub fn build_styled(
        segments: &[StyledSegment],
        mut measure: impl FnMut(&str, Option<StyleId>) -> f32,
    ) -> Self {
        let mut positions = vec![0.0f32];

        let mut total = 0.0f32;
        for segment in segments {
            for (_, ch) in codepoints(&segment.text) {
                let mut buf = [0u8; 4];
                let s = ch.encode_utf8(&mut buf);
                total += measure(s, segment.style).max(0.0);
                positions.push(total);
            }
        }

        Self { positions }
    }

    /// Number of codepoints the cache covers.
    #[inline]
    pub fn codepoint_len(&self) -> usize {
        self.positions.len() - 1
    }

    /// `true` when the line has no (decodable) codepoints.
    #[inline]
    pub fn is_empty_line(&self) -> bool {
        self.codepoint_len() == 0
    }

    /// Full pixel width of the line.
    #[inline]
    pub fn total_width(&self) -> f32 {
        self.positions.last().copied().unwrap_or(0.0)
    }

    /// Pixel offset of the `char_index`-th boundary, clamped to the
    /// line's extent.
    pub fn offset_at(&self, char_index: usize) -> f32 {
        let i = char_index.min(self.positions.len() - 1);
        self.positions[i]
    }

    /// Character index whose boundary is nearest to pixel `x`.
    ///
    /// Monotonic in `x`, always within `[0, codepoint_len]`. Negative
    /// `x` and empty caches map to 0. When `x` is exactly equidistant
    /// between two boundaries the later index wins.
    pub fn index_at_pixel(&self, x: f32) -> usize {
        if x < 0.0 {
            return 0;
        }

        // First boundary at or past x.
        let i = self.positions.partition_point(|&p| p < x);
        if i == 0 {
            return 0;
        }
        if i >= self.positions.len() {
            return self.positions.len() - 1;
        }

        let prev = self.positions[i - 1];
        let curr = self.positions[i];
        if x - prev < curr - x { i - 1 } else { i }
    }
}

struct CachedLine {
    line: usize,
    content: Vec<u8>,
    styles: Vec<Option<StyleId>>,
    cache: WidthCache,
}

/// Engine-owned width cache, keyed by the line it was built from.
///
/// Replaces the global mutable cache of older selection code: the key
/// (line index + content bytes + segment styles) guarantees the cache
/// is never consulted for a line it was not built for.
#[derive(Default)]
pub struct LineWidths {
    entry: Option<CachedLine>,
}

impl LineWidths {
    /// Drop the cached line. Called at the start of every frame, since
    /// the host may have restyled text without changing its bytes.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Return the width cache for `line`, rebuilding it when the cached
    /// entry was built from different content.
    pub fn ensure(&mut self, host: &dyn SelectionHost, line: usize) -> &WidthCache {
        let styled = host.styled_line(line);

        let (content, styles): (Vec<u8>, Vec<Option<StyleId>>) = match &styled {
            Some(sl) => {
                let mut content = Vec::new();
                let mut styles = Vec::with_capacity(sl.segments.len());
                for segment in &sl.segments {
                    content.extend_from_slice(&segment.text);
                    styles.push(segment.style);
                }
                (content, styles)
            }
            None => (host.line_text(line).into_owned(), Vec::new()),
        };

        let entry = match self.entry.take() {
            Some(e) if e.line == line && e.content == content && e.styles == styles => e,
            _ => {
                log::trace!(target: "select.widths", "rebuilding width cache for line {line}");
                let cache = match &styled {
                    Some(sl) => {
                        WidthCache::build_styled(&sl.segments, |s, st| host.measure_text(s, st))
                    }
                    None => WidthCache::build(&content, |s| host.measure_text(s, None)),
                };
                CachedLine {
                    line,
                    content,
                    styles,
                    cache,
                }
            }
        };
        &self.entry.insert(entry).cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::borrow::Cow;

    use crate::host::{FrameInput, Point, Rgba, StyledLine};

    fn ten_px(s: &str) -> f32 {
        s.chars().count() as f32 * 10.0
    }

    struct StubHost {
        lines: Vec<Vec<u8>>,
        styled: Vec<Option<StyledLine>>,
    }

    impl StubHost {
        fn new(lines: &[&[u8]]) -> Self {
            Self {
                lines: lines.iter().map(|l| l.to_vec()).collect(),
                styled: Vec::new(),
            }
        }
    }

    impl SelectionHost for StubHost {
        fn line_count(&self) -> usize {
            self.lines.len()
        }

        fn line_text(&self, index: usize) -> Cow<'_, [u8]> {
            Cow::Borrowed(self.lines.get(index).map_or(&[][..], |l| l.as_slice()))
        }

        fn styled_line(&self, index: usize) -> Option<StyledLine> {
            self.styled.get(index).cloned().flatten()
        }

        fn measure_text(&self, text: &str, style: Option<StyleId>) -> f32 {
            let base = ten_px(text);
            if style.is_some() { base * 2.0 } else { base }
        }

        fn line_height(&self) -> f32 {
            16.0
        }

        fn frame_input(&self) -> FrameInput {
            FrameInput::default()
        }

        fn visible_bounds(&self) -> (Point, Point) {
            (Point::default(), Point::default())
        }

        fn apply_scroll(&mut self, _delta: Point) {}

        fn set_clipboard(&mut self, _text: &str) {}

        fn fill_rect(&mut self, _min: Point, _max: Point, _color: Rgba) {}
    }

    #[test]
    fn build_empty_yields_single_zero_entry() {
        let cache = WidthCache::build(b"", ten_px);
        assert_eq!(cache.codepoint_len(), 0);
        assert!(cache.is_empty_line());
        assert_eq!(cache.offset_at(0), 0.0);
        assert_eq!(cache.total_width(), 0.0);
    }

    #[test]
    fn build_multibyte_prefix_array() {
        // 5 codepoints, one of them multi-byte: 6-entry prefix array.
        let cache = WidthCache::build("héllo".as_bytes(), ten_px);
        assert_eq!(cache.codepoint_len(), 5);
        assert_eq!(cache.offset_at(0), 0.0);
        for i in 0..5 {
            assert!(cache.offset_at(i) < cache.offset_at(i + 1));
        }
        assert_eq!(cache.total_width(), 50.0);
    }

    #[test]
    fn build_truncates_at_invalid_utf8() {
        let bytes = [b'a', b'b', 0xFF, b'c'];
        let cache = WidthCache::build(&bytes, ten_px);
        assert_eq!(cache.codepoint_len(), 2);
    }

    #[test]
    fn index_at_pixel_monotonic_and_bounded() {
        let cache = WidthCache::build(b"hello", ten_px);

        let mut last = 0;
        let mut x = -5.0;
        while x < 80.0 {
            let i = cache.index_at_pixel(x);
            assert!(i >= last, "not monotonic at x={x}");
            assert!(i <= cache.codepoint_len());
            last = i;
            x += 0.5;
        }

        assert_eq!(cache.index_at_pixel(-1.0), 0);
        assert_eq!(cache.index_at_pixel(f32::INFINITY), cache.codepoint_len());
    }

    #[test]
    fn index_at_pixel_picks_nearest_boundary() {
        let cache = WidthCache::build(b"hello", ten_px);
        assert_eq!(cache.index_at_pixel(0.0), 0);
        assert_eq!(cache.index_at_pixel(4.0), 0); // closer to 0 than 10
        assert_eq!(cache.index_at_pixel(6.0), 1); // closer to 10 than 0
        assert_eq!(cache.index_at_pixel(19.0), 2);
    }

    #[test]
    fn index_at_pixel_exact_tie_prefers_later() {
        // Boundaries at 0, 10, 20, ...; 5.0 is equidistant from 0 and 10.
        let cache = WidthCache::build(b"hello", ten_px);
        assert_eq!(cache.index_at_pixel(5.0), 1);
        assert_eq!(cache.index_at_pixel(15.0), 2);
    }

    #[test]
    fn ensure_reuses_cache_for_unchanged_line() {
        let host = StubHost::new(&[b"ab"]);
        let mut widths = LineWidths::default();

        assert_eq!(widths.ensure(&host, 0).total_width(), 20.0);
        // Same line, same content: the answer stays stable.
        assert_eq!(widths.ensure(&host, 0).total_width(), 20.0);
        assert_eq!(widths.ensure(&host, 0).codepoint_len(), 2);
    }

    #[test]
    fn ensure_rebuilds_when_content_changes() {
        let mut host = StubHost::new(&[b"ab"]);
        let mut widths = LineWidths::default();
        assert_eq!(widths.ensure(&host, 0).codepoint_len(), 2);

        host.lines[0] = b"abcd".to_vec();
        let cache = widths.ensure(&host, 0);
        assert_eq!(cache.codepoint_len(), 4);
        assert_eq!(cache.total_width(), 40.0);
    }

    #[test]
    fn ensure_rebuilds_for_different_line() {
        let host = StubHost::new(&[b"ab", b"wxyz"]);
        let mut widths = LineWidths::default();

        assert_eq!(widths.ensure(&host, 0).codepoint_len(), 2);
        assert_eq!(widths.ensure(&host, 1).codepoint_len(), 4);
        assert_eq!(widths.ensure(&host, 0).codepoint_len(), 2);
    }

    #[test]
    fn ensure_rebuilds_when_styles_change() {
        let mut host = StubHost::new(&[b"ab"]);
        host.styled = vec![Some(StyledLine {
            segments: vec![StyledSegment {
                text: b"ab".to_vec(),
                style: None,
            }],
            height: 1.0,
        })];
        let mut widths = LineWidths::default();
        assert_eq!(widths.ensure(&host, 0).total_width(), 20.0);

        // Same bytes, restyled to the double-width font.
        host.styled[0] = Some(StyledLine {
            segments: vec![StyledSegment {
                text: b"ab".to_vec(),
                style: Some(StyleId::from_raw(1)),
            }],
            height: 1.0,
        });
        assert_eq!(widths.ensure(&host, 0).total_width(), 40.0);
    }

    #[test]
    fn styled_build_spans_segments() {
        let segments = vec![
            StyledSegment {
                text: b"ab".to_vec(),
                style: Some(StyleId::from_raw(1)),
            },
            StyledSegment {
                text: b"cd".to_vec(),
                style: None,
            },
        ];
        // Style 1 is twice as wide.
        let cache = WidthCache::build_styled(&segments, |s, st| {
            let base = s.chars().count() as f32 * 10.0;
            if st.is_some() { base * 2.0 } else { base }
        });

        assert_eq!(cache.codepoint_len(), 4);
        assert_eq!(cache.offset_at(1), 20.0);
        assert_eq!(cache.offset_at(2), 40.0);
        assert_eq!(cache.offset_at(3), 50.0);
        assert_eq!(cache.offset_at(4), 60.0);
    }
}
