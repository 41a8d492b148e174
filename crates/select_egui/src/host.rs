//! [`SelectionHost`] implementation over an egui `Ui`.

use std::borrow::Cow;

use egui::{CursorIcon, Key, Modifiers, Pos2, Rect, Response, Ui};
use select_core::{FrameInput, Point, Rgba, SelectionHost, StyleId, StyledLine};

use crate::measure::StyleTable;

/// Read access to the lines a selection runs over.
///
/// Out-of-range indices must answer with empty content, not panic; the
/// engine can briefly hold a selection over lines that no longer exist.
pub trait LineSource {
    fn line_count(&self) -> usize;

    fn line(&self, index: usize) -> &str;

    /// Styled view of one line, for sources with per-segment fonts.
    fn styled_line(&self, _index: usize) -> Option<StyledLine> {
        None
    }
}

impl<T: AsRef<str>> LineSource for [T] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line(&self, index: usize) -> &str {
        self.get(index).map_or("", |s| s.as_ref())
    }
}

impl<T: AsRef<str>> LineSource for Vec<T> {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line(&self, index: usize) -> &str {
        self.as_slice().line(index)
    }
}

/// Per-frame [`SelectionHost`] over an egui `Ui`.
///
/// Borrows the `Ui` for one `update` call: measurement goes through the
/// egui font atlas, highlights through the `Ui` painter, scrolling
/// through `Ui::scroll_with_delta`, and the clipboard through the egui
/// output.
pub struct EguiSelectionHost<'a, S: LineSource + ?Sized> {
    ui: &'a mut Ui,
    lines: &'a S,
    styles: &'a StyleTable,
    input: FrameInput,
    autoscroll: bool,
}

impl<'a, S: LineSource + ?Sized> EguiSelectionHost<'a, S> {
    pub fn new(
        ui: &'a mut Ui,
        response: &Response,
        lines: &'a S,
        styles: &'a StyleTable,
        clicks: u32,
    ) -> Self {
        let input = snapshot_input(ui, response, clicks);
        let autoscroll = response.dragged();
        Self {
            ui,
            lines,
            styles,
            input,
            autoscroll,
        }
    }
}

impl<S: LineSource + ?Sized> SelectionHost for EguiSelectionHost<'_, S> {
    fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    fn line_text(&self, index: usize) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.lines.line(index).as_bytes())
    }

    fn styled_line(&self, index: usize) -> Option<StyledLine> {
        self.lines.styled_line(index)
    }

    fn measure_text(&self, text: &str, style: Option<StyleId>) -> f32 {
        self.styles.measure(self.ui.ctx(), text, style)
    }

    fn line_height(&self) -> f32 {
        self.styles.row_height(self.ui.ctx())
    }

    fn frame_input(&self) -> FrameInput {
        self.input
    }

    fn visible_bounds(&self) -> (Point, Point) {
        let clip = self.ui.clip_rect();
        (
            Point::new(clip.min.x, clip.min.y),
            Point::new(clip.max.x, clip.max.y),
        )
    }

    fn autoscroll_allowed(&self) -> bool {
        self.autoscroll
    }

    fn apply_scroll(&mut self, delta: Point) {
        // egui's delta moves the content, not the viewport.
        self.ui.scroll_with_delta(egui::vec2(-delta.x, -delta.y));
    }

    fn set_clipboard(&mut self, text: &str) {
        self.ui.ctx().copy_text(text.to_owned());
    }

    fn fill_rect(&mut self, min: Point, max: Point, color: Rgba) {
        let rect = Rect::from_min_max(Pos2::new(min.x, min.y), Pos2::new(max.x, max.y));
        let fill = egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a);
        self.ui.painter().rect_filled(rect, 0.0, fill);
    }

    fn set_text_cursor(&mut self) {
        self.ui.ctx().set_cursor_icon(CursorIcon::Text);
    }
}

fn snapshot_input(ui: &Ui, response: &Response, clicks: u32) -> FrameInput {
    let hovered = response.hovered();

    // Consume the shortcuts only while the pointer is over the text, so
    // other widgets keep their own copy/select-all handling.
    let (select_all_shortcut, copy_shortcut) = if hovered {
        ui.input_mut(|i| {
            (
                i.consume_key(Modifiers::COMMAND, Key::A),
                i.consume_key(Modifiers::COMMAND, Key::C),
            )
        })
    } else {
        (false, false)
    };

    ui.input(|i| FrameInput {
        pointer: i
            .pointer
            .interact_pos()
            .map_or(Point::default(), |p| Point::new(p.x, p.y)),
        primary_pressed: i.pointer.primary_pressed(),
        primary_down: i.pointer.primary_down(),
        primary_released: i.pointer.primary_released(),
        clicks,
        dragging: i.pointer.is_decidedly_dragging() && i.pointer.primary_down(),
        shift: i.modifiers.shift,
        hovered,
        select_all_shortcut,
        copy_shortcut,
        delta_time: i.stable_dt,
    })
}
