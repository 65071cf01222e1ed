//! Terminal UI for practice sessions (ratatui + crossterm)

pub mod practice_app;
pub mod practice_view;
pub mod theme;

pub use practice_app::{Action, PracticeApp};
pub use theme::{current_theme, Theme};
