//! The per-frame selection engine: gesture dispatch, highlight
//! rendering, and text extraction.

use crate::hit;
use crate::host::{FrameInput, Point, SelectionHost};
use crate::options::SelectOptions;
use crate::selection::{Position, Selection, SelectionState};
use crate::text::{byte_offset_at, codepoint_count, valid_prefix_len};
use crate::widths::LineWidths;
use crate::words::word_range_at;

/// Interactive text-selection engine over a host-rendered text block.
///
/// The host calls [`update`](Self::update) once per frame after drawing
/// its text, passing the on-screen origin of the text block. The engine
/// polls input through the host, updates the selection, paints
/// highlight rectangles, and services the select-all/copy shortcuts.
///
/// # Example
///
/// ```
/// use select_core::{Point, SelectOptions, TextSelect};
///
/// let mut engine = TextSelect::new(SelectOptions::default());
/// assert!(!engine.has_selection());
/// # let _ = Point::new(0.0, 0.0);
/// ```
pub struct TextSelect {
    state: SelectionState,
    widths: LineWidths,
    opts: SelectOptions,
    vertical_offset: f32,
    // A press only drives the selection if it started on the text
    // region; keeps drags that begin on other widgets from selecting.
    mouse_down_armed: bool,
}

impl Default for TextSelect {
    fn default() -> Self {
        Self::new(SelectOptions::default())
    }
}

impl TextSelect {
    pub fn new(opts: SelectOptions) -> Self {
        Self {
            state: SelectionState::new(),
            widths: LineWidths::default(),
            opts,
            vertical_offset: 0.0,
            mouse_down_armed: false,
        }
    }

    /// Extra vertical offset between the text origin and the first
    /// line, for hosts that stack other content above the block.
    pub fn set_vertical_offset(&mut self, offset: f32) {
        self.vertical_offset = offset;
    }

    pub fn vertical_offset(&self) -> f32 {
        self.vertical_offset
    }

    /// `true` when both selection endpoints are set. Usable by
    /// surrounding UI to enable a "copy" action.
    pub fn has_selection(&self) -> bool {
        !self.state.is_empty()
    }

    /// The current ordered selection, if any.
    pub fn selection(&self) -> Option<Selection> {
        self.state.current()
    }

    /// Discard the selection.
    pub fn clear(&mut self) {
        self.state.clear();
    }

    /// Per-frame entry point. `origin` is the on-screen position of the
    /// text block's top-left corner.
    pub fn update(&mut self, host: &mut dyn SelectionHost, origin: Point) {
        // Lines are host-owned frame views; never trust last frame's
        // widths against this frame's content.
        self.widths.invalidate();

        let input = host.frame_input();

        if input.hovered {
            host.set_text_cursor();
        }

        if input.primary_pressed && input.hovered {
            self.mouse_down_armed = true;
        }
        if input.primary_released {
            self.mouse_down_armed = false;
        }

        if input.primary_down && self.mouse_down_armed {
            self.handle_mouse_down(&*host, &input, origin);
            if !input.hovered {
                self.autoscroll(host, &input);
            }
        }

        self.render(host, origin);

        if input.select_all_shortcut {
            self.select_all(&*host);
        } else if input.copy_shortcut {
            self.copy(host);
        }
    }

    /// Select from the first character of the first line to the last
    /// character of the last line.
    pub fn select_all(&mut self, host: &dyn SelectionHost) {
        let line_count = host.line_count();
        if line_count == 0 {
            self.state.clear();
            return;
        }

        let last = line_count - 1;
        let last_len = codepoint_count(&host.line_text(last));
        self.state
            .select_range(Position::ORIGIN, Position::new(last_len, last));
    }

    /// Serialize the selected range to a plain-text string with line
    /// breaks between lines. `None` when there is no usable selection.
    pub fn extract_text(&self, host: &dyn SelectionHost) -> Option<String> {
        let sel = self.checked_selection(host)?;

        let mut out = String::new();
        for line in sel.start.line..=sel.end.line {
            let text = host.line_text(line);
            let is_last = line == sel.end.line;

            let valid_len = valid_prefix_len(&text);
            if valid_len == 0 {
                if !is_last {
                    out.push('\n');
                }
                continue;
            }

            let from_char = if line == sel.start.line {
                sel.start.character
            } else {
                0
            };
            let start_b = byte_offset_at(&text, from_char).min(valid_len);
            let end_b = if is_last {
                byte_offset_at(&text, sel.end.character.max(from_char))
            } else {
                valid_len
            };
            let end_b = end_b.clamp(start_b, valid_len);

            if let Ok(s) = std::str::from_utf8(&text[start_b..end_b]) {
                out.push_str(s);
                // Lines that don't already end in a newline get one,
                // except after the final line.
                if !is_last && !s.ends_with('\n') {
                    out.push('\n');
                }
            } else if !is_last {
                out.push('\n');
            }
        }

        Some(out)
    }

    /// Extract the selection and hand it to the host clipboard.
    pub fn copy(&mut self, host: &mut dyn SelectionHost) {
        let Some(text) = self.extract_text(&*host) else {
            return;
        };
        host.set_clipboard(&text);
    }

    // Bounds-checked read of the selection: a host whose line count
    // shrank since the selection was made degrades it to empty.
    fn checked_selection(&self, host: &dyn SelectionHost) -> Option<Selection> {
        let sel = self.state.current()?;
        let line_count = host.line_count();
        if sel.start.line >= line_count || sel.end.line >= line_count {
            log::debug!(
                target: "select.engine",
                "selection lines {}..={} out of range (host has {line_count}); treating as empty",
                sel.start.line,
                sel.end.line,
            );
            return None;
        }
        Some(sel)
    }

    // Pointer position (local to the text block) to the nearest
    // `(character, line)` boundary.
    fn position_at_pointer(
        &mut self,
        host: &dyn SelectionHost,
        local: Point,
        line_count: usize,
    ) -> Position {
        let line = hit::line_index_at_y(local.y, host.line_height(), line_count, |i| {
            height_multiplier(host, i)
        });
        let character = self.widths.ensure(host, line).index_at_pixel(local.x);
        Position::new(character, line)
    }

    fn handle_mouse_down(&mut self, host: &dyn SelectionHost, input: &FrameInput, origin: Point) {
        let line_count = host.line_count();
        if line_count == 0 {
            return;
        }

        let local = Point::new(
            input.pointer.x - origin.x,
            input.pointer.y - origin.y - self.vertical_offset,
        );
        let Position { character, line } = self.position_at_pointer(host, local, line_count);

        if input.clicks > 0 {
            log::trace!(
                target: "select.engine",
                "click x{} at ({character}, {line})",
                input.clicks,
            );

            if input.clicks % 3 == 0 {
                self.select_line(host, line, line_count);
            } else if input.clicks % 2 == 0 {
                self.select_word(host, character, line);
            } else if input.shift {
                // The selection starts from the very beginning if no
                // anchor exists yet.
                if !self.state.has_anchor() {
                    self.state.set_anchor(Position::ORIGIN);
                }
                self.state.extend_to(Position::new(character, line));
            } else {
                self.state.set_anchor(Position::new(character, line));
            }
        } else if input.dragging {
            self.state.extend_to(Position::new(character, line));
        }
    }

    // Triple click: column 0 of `line` to column 0 of the next line, or
    // to end of text when `line` is the last line.
    fn select_line(&mut self, host: &dyn SelectionHost, line: usize, line_count: usize) {
        let at_last_line = line + 1 == line_count;
        let end = if at_last_line {
            Position::new(codepoint_count(&host.line_text(line)), line)
        } else {
            Position::new(0, line + 1)
        };
        self.state.select_range(Position::new(0, line), end);
    }

    fn select_word(&mut self, host: &dyn SelectionHost, character: usize, line: usize) {
        let text = host.line_text(line);
        let (start, end) = word_range_at(&text, character);
        self.state
            .select_range(Position::new(start, line), Position::new(end, line));
    }

    fn autoscroll(&self, host: &mut dyn SelectionHost, input: &FrameInput) {
        if !host.autoscroll_allowed() {
            return;
        }

        let (min, max) = host.visible_bounds();
        let dx = scroll_delta(input.pointer.x, min.x, max.x, input.delta_time, &self.opts);
        let dy = scroll_delta(input.pointer.y, min.y, max.y, input.delta_time, &self.opts);

        if dx != 0.0 || dy != 0.0 {
            host.apply_scroll(Point::new(dx, dy));
        }
    }

    fn render(&mut self, host: &mut dyn SelectionHost, origin: Point) {
        let Some(sel) = self.checked_selection(&*host) else {
            return;
        };

        let base_h = host.line_height();
        let space_w = host.measure_text(" ", None).max(0.0);

        let mut top = hit::line_top(sel.start.line, base_h, |i| height_multiplier(&*host, i));
        for line in sel.start.line..=sel.end.line {
            let h = (base_h * height_multiplier(&*host, line).max(0.0)).max(1.0);

            let (x0, x1) = {
                let widths = self.widths.ensure(&*host, line);
                if widths.is_empty_line() {
                    // Keep zero-length selections on blank lines visible.
                    (0.0, space_w * self.opts.empty_line_space_widths)
                } else {
                    let x0 = if line == sel.start.line {
                        widths.offset_at(sel.start.character)
                    } else {
                        0.0
                    };
                    let x1 = if line == sel.end.line {
                        widths.offset_at(sel.end.character)
                    } else {
                        // Reserve one space width so the selected line
                        // break is visible.
                        widths.total_width() + space_w
                    };
                    (x0, x1)
                }
            };

            let min = Point::new(origin.x + x0, origin.y + self.vertical_offset + top);
            let max = Point::new(origin.x + x1, min.y + h);
            host.fill_rect(min, max, self.opts.highlight_color);

            top += h;
        }
    }
}

fn height_multiplier(host: &dyn SelectionHost, line: usize) -> f32 {
    host.styled_line(line).map_or(1.0, |l| l.height)
}

// Scroll delta for one axis: proportional to how far the pointer sits
// past the boundary, clamped to a maximum overshoot, scaled by elapsed
// frame time. Zero inside bounds.
fn scroll_delta(v: f32, min: f32, max: f32, delta_time: f32, opts: &SelectOptions) -> f32 {
    let scale = opts.scroll_speed * delta_time.max(0.0);

    if v < min {
        (-(min - v)).max(-opts.max_scroll_step) * scale
    } else if v > max {
        (v - max).min(opts.max_scroll_step) * scale
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPTS: SelectOptions = SelectOptions {
        scroll_speed: 10.0,
        max_scroll_step: 100.0,
        highlight_color: crate::host::Rgba::new(0, 0, 0, 255),
        empty_line_space_widths: 2.0,
    };

    #[test]
    fn scroll_delta_zero_inside_bounds() {
        assert_eq!(scroll_delta(50.0, 0.0, 100.0, 0.016, &OPTS), 0.0);
        assert_eq!(scroll_delta(0.0, 0.0, 100.0, 0.016, &OPTS), 0.0);
        assert_eq!(scroll_delta(100.0, 0.0, 100.0, 0.016, &OPTS), 0.0);
    }

    #[test]
    fn scroll_delta_proportional_past_boundary() {
        let d = scroll_delta(150.0, 0.0, 100.0, 0.016, &OPTS);
        assert!(d > 0.0);
        assert!((d - 50.0 * 10.0 * 0.016).abs() < 1e-4);

        let d = scroll_delta(-30.0, 0.0, 100.0, 0.016, &OPTS);
        assert!(d < 0.0);
        assert!((d + 30.0 * 10.0 * 0.016).abs() < 1e-4);
    }

    #[test]
    fn scroll_delta_magnitude_capped() {
        // 500 px past the edge clamps to the 100 px overshoot cap.
        let d = scroll_delta(600.0, 0.0, 100.0, 0.016, &OPTS);
        assert!((d - 100.0 * 10.0 * 0.016).abs() < 1e-4);

        let d = scroll_delta(-600.0, 0.0, 100.0, 0.016, &OPTS);
        assert!((d + 100.0 * 10.0 * 0.016).abs() < 1e-4);
    }
}
