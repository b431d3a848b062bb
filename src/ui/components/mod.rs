//! Reusable render pieces for the folio TUI.
pub mod cli_panel;
pub mod help_strip;
pub mod navbar;
pub mod page_view;
pub mod palette;
