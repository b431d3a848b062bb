//! Thin FrankenTUI adapter for the folio UI.
//!
//! Centralizes the handful of ftui imports the app model touches so call
//! sites do not each spell out the crate paths.

pub use ftui::core::geometry::Rect;
pub use ftui::widgets::Widget;
pub use ftui::{App, Cmd, Event, Frame, KeyCode, KeyEvent, Model, Modifiers, Style};
pub use ftui::core::animation::{Animation, Spring};
