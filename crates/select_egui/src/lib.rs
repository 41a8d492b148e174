//! # select_egui
//!
//! egui backend for the [`select_core`] selection engine.
//!
//! Two layers:
//!
//! - [`EguiSelectionHost`]: implements [`select_core::SelectionHost`]
//!   over a `Ui`, for apps that paint their text themselves and only
//!   want selection behavior on top of it.
//! - [`SelectableText`]: a retained widget that paints plain or styled
//!   lines and runs the engine over them in one `show` call.
//!
//! Fonts are resolved through a [`StyleTable`], which maps the engine's
//! opaque style ids onto egui `FontId`s.

mod host;
mod measure;
mod widget;

pub use host::{EguiSelectionHost, LineSource};
pub use measure::StyleTable;
pub use widget::SelectableText;
