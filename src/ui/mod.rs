//! Terminal screens and widgets
//!
//! Everything here is plain state plus `render` functions taking a
//! [`ratatui::Frame`]; the event loop lives in [`crate::runtime`].

pub mod app;
pub mod detail;
pub mod list;
pub mod markdown;
pub mod operations;
pub mod text;
pub mod theme;
pub mod viewport;
pub mod welcome;

pub use app::{App, Command, Message, Screen};
pub use detail::DetailPanel;
pub use list::{FilterState, ListEntry, SelectList};
pub use operations::{Focus, OperationEntry, OperationsScreen, Pane};
pub use theme::Theme;
pub use viewport::Viewport;
pub use welcome::WelcomeScreen;
