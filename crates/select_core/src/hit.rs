//! Pointer-to-text coordinate mapping.

/// Line index under vertical offset `y` (relative to the text origin).
///
/// Walks cumulative per-line heights so rows with height multipliers
/// (headings) land correctly. Out-of-range offsets clamp to the first
/// or last line instead of failing.
pub fn line_index_at_y(
    y: f32,
    base_line_height: f32,
    line_count: usize,
    mut height_multiplier: impl FnMut(usize) -> f32,
) -> usize {
    if line_count == 0 {
        return 0;
    }

    let y = y.max(0.0);
    let mut top = 0.0f32;
    for i in 0..line_count {
        let h = (base_line_height * height_multiplier(i).max(0.0)).max(1.0);
        if y < top + h {
            return i;
        }
        top += h;
    }

    line_count - 1
}

/// Cumulative vertical offset of the top of `line`, honoring per-line
/// height multipliers.
pub fn line_top(
    line: usize,
    base_line_height: f32,
    mut height_multiplier: impl FnMut(usize) -> f32,
) -> f32 {
    let mut top = 0.0f32;
    for i in 0..line {
        top += (base_line_height * height_multiplier(i).max(0.0)).max(1.0);
    }
    top
}
