//! TUI entrypoint and layout.
pub mod app;
pub mod components;
pub mod ftui_adapter;
pub mod style_system;
