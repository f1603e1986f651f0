//! UI layer for the desktop console: app shell, panels and small widgets.

pub mod app;
pub mod panels;
pub mod widgets;

pub use app::ConsoleApp;
