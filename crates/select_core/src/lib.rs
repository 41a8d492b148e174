//! # select_core
//!
//! UI-agnostic text-selection engine for multi-line, variably-styled
//! text displays rendered anew every frame.
//!
//! The crate turns pointer gestures (click, double-click, triple-click,
//! drag, shift-click) and keyboard shortcuts into a character-range
//! selection over logical text lines, paints the selection highlight,
//! and extracts the selected range as a clipboard-ready string:
//!
//! - [`TextSelect`]: the per-frame engine (gesture dispatch, rendering,
//!   extraction)
//! - [`SelectionHost`]: the narrow capability interface the host
//!   renderer implements (line access, measurement, input polling,
//!   drawing, clipboard)
//! - [`WidthCache`]: per-line cumulative pixel widths at each codepoint
//!   boundary, the basis for pixel ↔ character mapping
//! - [`SelectionState`]: the anchor/cursor endpoint machine
//!
//! ## Design Principles
//!
//! This crate is intentionally UI-agnostic and does not depend on any
//! graphics framework. The host renderer is injected through
//! [`SelectionHost`], so the engine can be driven by egui, a terminal
//! cell grid, or an in-memory test double alike.
//!
//! All positions are codepoint indices over UTF-8 bytes. Malformed
//! UTF-8 truncates measurement and extraction at the last valid
//! boundary; out-of-range coordinates clamp; a host whose line count
//! shrank degrades the selection to empty. Nothing in this crate is a
//! fatal error.

pub mod engine;
pub mod hit;
pub mod host;
pub mod options;
pub mod selection;
pub mod text;
pub mod widths;
pub mod words;

pub use engine::TextSelect;
pub use host::{
    FrameInput, Point, Rgba, SelectionHost, StyleId, StyledLine, StyledSegment,
};
pub use options::SelectOptions;
pub use selection::{Position, Selection, SelectionState};
pub use widths::{LineWidths, WidthCache};
