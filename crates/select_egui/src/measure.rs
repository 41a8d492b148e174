use std::cell::RefCell;
use std::collections::HashMap;

use egui::{Color32, Context, FontId};
use select_core::StyleId;

// `Color32` does not affect text metrics; measure everything white.
const MEASURE_COLOR: Color32 = Color32::WHITE;

/// Maps the engine's opaque [`StyleId`]s to egui fonts.
///
/// Every id not registered with [`with_style`](Self::with_style) falls
/// back to the default font, as does unstyled text.
pub struct StyleTable {
    default_font: FontId,
    fonts: HashMap<StyleId, FontId>,
    space_width_cache: RefCell<HashMap<u32, f32>>,
}

impl StyleTable {
    pub fn new(default_font: FontId) -> Self {
        Self {
            default_font,
            fonts: HashMap::new(),
            space_width_cache: RefCell::new(HashMap::new()),
        }
    }

    /// Register the font for a style id, replacing any previous one.
    pub fn with_style(mut self, id: StyleId, font: FontId) -> Self {
        self.fonts.insert(id, font);
        self
    }

    pub fn font_for(&self, style: Option<StyleId>) -> &FontId {
        style
            .and_then(|id| self.fonts.get(&id))
            .unwrap_or(&self.default_font)
    }

    /// Height of one text row in the default font.
    pub fn row_height(&self, ctx: &Context) -> f32 {
        let font = self.default_font.clone();
        ctx.fonts(|f| f.row_height(&font))
    }

    /// Pixel width of `text` in the font for `style`.
    pub fn measure(&self, ctx: &Context, text: &str, style: Option<StyleId>) -> f32 {
        let font_id = self.font_for(style).clone();

        if text == " " {
            return self.space_width(ctx, font_id);
        }

        ctx.fonts(|f| {
            f.layout_no_wrap(text.to_owned(), font_id, MEASURE_COLOR)
                .rect
                .width()
        })
    }

    // A bare space often lays out with zero width; resolve its width
    // once per font size and cache it.
    fn space_width(&self, ctx: &Context, font_id: FontId) -> f32 {
        let key = font_id.size.round().max(0.0) as u32;
        if let Some(w) = self.space_width_cache.borrow().get(&key).copied() {
            return w;
        }

        // NBSP lays out most reliably across egui backends.
        let nbsp = "\u{00A0}";
        let w_nbsp = ctx.fonts(|f| {
            f.layout_no_wrap(nbsp.to_owned(), font_id.clone(), MEASURE_COLOR)
                .rect
                .width()
        });

        let w = if w_nbsp.is_finite() && w_nbsp > 0.0 {
            w_nbsp
        } else {
            // Fallback: difference method with low-kerning-risk chars.
            let w_with = ctx.fonts(|f| {
                f.layout_no_wrap(format!("x{nbsp}x"), font_id.clone(), MEASURE_COLOR)
                    .rect
                    .width()
            });
            let w_without = ctx.fonts(|f| {
                f.layout_no_wrap("xx".to_owned(), font_id.clone(), MEASURE_COLOR)
                    .rect
                    .width()
            });
            let w = (w_with - w_without).max(0.0);

            if w.is_finite() && w > 0.0 {
                w
            } else {
                (font_id.size * 0.33).max(1.0)
            }
        };

        self.space_width_cache.borrow_mut().insert(key, w);
        w
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::new(FontId::proportional(14.0))
    }
}
