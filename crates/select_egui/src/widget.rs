//! A ready-made selectable text block widget.

use egui::{Align2, Pos2, Response, Sense, Ui};
use select_core::{Point, SelectOptions, Selection, TextSelect};

use crate::host::{EguiSelectionHost, LineSource};
use crate::measure::StyleTable;

// Press-to-press click chaining, matching egui's own click detection.
const MAX_CLICK_DELAY: f64 = 0.3;
const MAX_CLICK_DIST: f32 = 6.0;

/// Retained widget state: the selection engine plus click chaining.
///
/// Draws its lines, then runs the engine over them, once per frame:
///
/// ```no_run
/// # use select_egui::{SelectableText, StyleTable};
/// # fn demo(ui: &mut egui::Ui, widget: &mut SelectableText) {
/// let lines = ["first line".to_string(), "second line".to_string()];
/// let styles = StyleTable::default();
/// widget.show(ui, &lines[..], &styles);
/// # }
/// ```
pub struct SelectableText {
    engine: TextSelect,
    clicks: ClickCounter,
}

impl SelectableText {
    pub fn new(opts: SelectOptions) -> Self {
        Self {
            engine: TextSelect::new(opts),
            clicks: ClickCounter::default(),
        }
    }

    pub fn has_selection(&self) -> bool {
        self.engine.has_selection()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.engine.selection()
    }

    pub fn clear_selection(&mut self) {
        self.engine.clear();
    }

    /// Lay out the lines, paint them, and run the selection engine over
    /// the painted block.
    pub fn show<S: LineSource + ?Sized>(
        &mut self,
        ui: &mut Ui,
        lines: &S,
        styles: &StyleTable,
    ) -> Response {
        let row_h = styles.row_height(ui.ctx());

        let mut total_h = 0.0f32;
        for i in 0..lines.line_count() {
            let mult = lines.styled_line(i).map_or(1.0, |l| l.height);
            total_h += (row_h * mult.max(0.0)).max(1.0);
        }

        let desired = egui::vec2(ui.available_width(), total_h.max(row_h));
        let (rect, response) = ui.allocate_exact_size(desired, Sense::click_and_drag());

        if ui.is_rect_visible(rect) {
            paint_lines(ui, rect.min, lines, styles, row_h);
        }

        let clicks = self.clicks.on_frame(ui, &response);
        let origin = Point::new(rect.min.x, rect.min.y);
        let mut host = EguiSelectionHost::new(ui, &response, lines, styles, clicks);
        self.engine.update(&mut host, origin);

        response
    }

    /// Direct engine access, for hosts that drive selection themselves
    /// (programmatic select-all, custom copy actions).
    pub fn engine_mut(&mut self) -> &mut TextSelect {
        &mut self.engine
    }
}

impl Default for SelectableText {
    fn default() -> Self {
        Self::new(SelectOptions::default())
    }
}

fn paint_lines<S: LineSource + ?Sized>(
    ui: &Ui,
    origin: Pos2,
    lines: &S,
    styles: &StyleTable,
    row_h: f32,
) {
    let painter = ui.painter();
    let color = ui.visuals().text_color();

    let mut top = origin.y;
    for i in 0..lines.line_count() {
        if let Some(styled) = lines.styled_line(i) {
            let mut x = origin.x;
            for seg in &styled.segments {
                let text = String::from_utf8_lossy(&seg.text);
                let font = styles.font_for(seg.style).clone();
                let drawn =
                    painter.text(Pos2::new(x, top), Align2::LEFT_TOP, text, font, color);
                x = drawn.max.x;
            }
            top += (row_h * styled.height.max(0.0)).max(1.0);
        } else {
            painter.text(
                Pos2::new(origin.x, top),
                Align2::LEFT_TOP,
                lines.line(i),
                styles.font_for(None).clone(),
                color,
            );
            top += row_h.max(1.0);
        }
    }
}

/// Counts press-to-press click chains at mouse-down time.
///
/// egui reports double/triple clicks on release, but the gesture
/// dispatch needs the count on the press that starts it.
#[derive(Default)]
struct ClickCounter {
    last_press_time: f64,
    last_press_pos: Pos2,
    count: u32,
}

impl ClickCounter {
    fn on_frame(&mut self, ui: &Ui, response: &Response) -> u32 {
        let pressed = ui.input(|i| i.pointer.primary_pressed());
        if !pressed {
            return 0;
        }

        // Every press advances the chain, including presses on other
        // widgets; otherwise press-here, press-elsewhere, press-here
        // would read as a double click.
        let (time, pos) = ui.input(|i| {
            (
                i.time,
                i.pointer.interact_pos().unwrap_or(self.last_press_pos),
            )
        });
        let count = self.register(time, pos);
        if response.hovered() { count } else { 0 }
    }

    fn register(&mut self, time: f64, pos: Pos2) -> u32 {
        let chained = time - self.last_press_time <= MAX_CLICK_DELAY
            && (pos - self.last_press_pos).length() <= MAX_CLICK_DIST;

        self.count = if chained { self.count + 1 } else { 1 };
        self.last_press_time = time;
        self.last_press_pos = pos;

        log::trace!(target: "select.clicks", "press chains to click x{}", self.count);
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rapid_presses_chain_into_multi_clicks() {
        let mut counter = ClickCounter::default();
        let pos = Pos2::new(10.0, 10.0);

        assert_eq!(counter.register(1.00, pos), 1);
        assert_eq!(counter.register(1.10, pos), 2);
        assert_eq!(counter.register(1.25, pos), 3);
    }

    #[test]
    fn slow_press_restarts_the_chain() {
        let mut counter = ClickCounter::default();
        let pos = Pos2::new(10.0, 10.0);

        assert_eq!(counter.register(1.0, pos), 1);
        assert_eq!(counter.register(2.0, pos), 1);
    }

    #[test]
    fn distant_press_restarts_the_chain() {
        let mut counter = ClickCounter::default();

        assert_eq!(counter.register(1.0, Pos2::new(10.0, 10.0)), 1);
        assert_eq!(counter.register(1.1, Pos2::new(40.0, 10.0)), 1);
    }

    #[test]
    fn press_on_another_widget_breaks_the_chain() {
        let mut counter = ClickCounter::default();
        let inside = Pos2::new(10.0, 10.0);

        assert_eq!(counter.register(1.0, inside), 1);
        // A press far away (another widget) within the delay window.
        assert_eq!(counter.register(1.1, Pos2::new(300.0, 10.0)), 1);
        // Back on the widget: a fresh single click, not a double.
        assert_eq!(counter.register(1.2, inside), 1);
    }
}
