//! Engine configuration.

use crate::host::Rgba;

/// Immutable gesture/rendering configuration, passed at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectOptions {
    /// Autoscroll speed in px/s per pixel of pointer overshoot.
    pub scroll_speed: f32,
    /// Maximum overshoot (px) fed into the autoscroll delta; pointer
    /// distances past the boundary beyond this are clamped.
    pub max_scroll_step: f32,
    /// Fill color for selection highlight rectangles.
    pub highlight_color: Rgba,
    /// Width of the highlight drawn on empty lines, in multiples of the
    /// host's space width, so zero-length selections stay visible.
    pub empty_line_space_widths: f32,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            scroll_speed: 10.0,
            max_scroll_step: 100.0,
            highlight_color: Rgba::new(61, 122, 204, 110),
            empty_line_space_widths: 2.0,
        }
    }
}
