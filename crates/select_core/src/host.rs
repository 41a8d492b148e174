//! Host capability interface.
//!
//! The engine never talks to a rendering framework directly. Everything
//! it needs from the surrounding renderer — line access, text
//! measurement, pointer/keyboard polling, highlight drawing, clipboard,
//! scrolling — is expressed as one narrow trait injected per frame.
//! This keeps the engine UI-agnostic and lets tests substitute an
//! in-memory host that serves fixed lines.

use std::borrow::Cow;

/// Opaque handle for a text style/font known to the host.
///
/// The value has no meaning inside this crate; it is only passed back
/// to [`SelectionHost::measure_text`] so the host can measure a styled
/// segment with the right font.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StyleId(u64);

impl StyleId {
    /// Create a `StyleId` from a raw u64 value.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the underlying raw value.
    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for StyleId {
    #[inline]
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

/// A 2D point/vector in the host's pixel coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 8-bit RGBA color handed to [`SelectionHost::fill_rect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// One styled run within a line.
#[derive(Clone, Debug, Default)]
pub struct StyledSegment {
    /// Raw UTF-8 bytes of the run.
    pub text: Vec<u8>,
    /// Style to measure the run with; `None` means the host's default.
    pub style: Option<StyleId>,
}

/// A host-provided view of one line with per-segment styling.
///
/// Lines are owned by the host and valid for the current frame only;
/// the engine fetches a fresh view whenever it needs one.
#[derive(Clone, Debug)]
pub struct StyledLine {
    pub segments: Vec<StyledSegment>,
    /// Height multiplier relative to the base line height (headings may
    /// be taller than 1.0).
    pub height: f32,
}

impl Default for StyledLine {
    fn default() -> Self {
        Self {
            segments: Vec::new(),
            height: 1.0,
        }
    }
}

/// Snapshot of pointer/keyboard state for one frame.
///
/// The engine is polled, not event-driven: the host samples its input
/// state once per frame and the engine derives gestures from the
/// current sample plus what the previous frame's sample told it.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    /// Pointer position in host pixels (same space as the text origin).
    pub pointer: Point,
    /// Primary button transitioned to down this frame.
    pub primary_pressed: bool,
    /// Primary button is currently held.
    pub primary_down: bool,
    /// Primary button transitioned to up this frame.
    pub primary_released: bool,
    /// Click count for a press this frame (1 single, 2 double, 3
    /// triple, ...); 0 when the frame has no fresh click.
    pub clicks: u32,
    /// The pointer is dragging with the primary button held.
    pub dragging: bool,
    /// Shift modifier is held.
    pub shift: bool,
    /// The pointer is over the selectable text region.
    pub hovered: bool,
    /// Select-all shortcut fired this frame.
    pub select_all_shortcut: bool,
    /// Copy shortcut fired this frame.
    pub copy_shortcut: bool,
    /// Seconds elapsed since the previous frame.
    pub delta_time: f32,
}

/// Capability interface the engine needs from its host renderer.
///
/// Line indices passed to `line_text`/`styled_line` may be stale when
/// the host's content shrank since the selection was made; hosts should
/// answer out-of-range indices with empty content rather than panic,
/// and the engine bounds-checks against `line_count` before access.
pub trait SelectionHost {
    /// Number of logical text lines currently displayed.
    fn line_count(&self) -> usize;

    /// Raw UTF-8 bytes of one line, without a trailing line break
    /// (a trailing `\n` is tolerated and handled during extraction).
    fn line_text(&self, index: usize) -> Cow<'_, [u8]>;

    /// Styled view of one line, when the host supports per-segment
    /// styling. Engine behavior differs only in measurement.
    fn styled_line(&self, _index: usize) -> Option<StyledLine> {
        None
    }

    /// Width of `text` in pixels when rendered with `style` (`None`
    /// means the host's default style).
    fn measure_text(&self, text: &str, style: Option<StyleId>) -> f32;

    /// Base line height in pixels (before per-line multipliers).
    fn line_height(&self) -> f32;

    /// Current pointer/keyboard snapshot.
    fn frame_input(&self) -> FrameInput;

    /// Min/max corners of the visible text region, in the same
    /// coordinate space as the pointer position.
    fn visible_bounds(&self) -> (Point, Point);

    /// Whether autoscroll may drive the surrounding container right
    /// now. Hosts return `false` while a container scrollbar is the
    /// active input target, or when no container is focused.
    fn autoscroll_allowed(&self) -> bool {
        true
    }

    /// Scroll the surrounding container by `delta` pixels.
    fn apply_scroll(&mut self, delta: Point);

    /// Replace the clipboard contents.
    fn set_clipboard(&mut self, text: &str);

    /// Draw one filled rectangle into the host's draw surface.
    fn fill_rect(&mut self, min: Point, max: Point, color: Rgba);

    /// Show a text (I-beam) cursor for this frame. Optional feedback;
    /// default is a no-op.
    fn set_text_cursor(&mut self) {}
}
