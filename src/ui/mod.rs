//! UI Components
//!
//! Rendering components for the two surface views. Components draw into an
//! `egui::Ui` and report user intent back as action values; they never
//! mutate application state themselves.

pub mod editor;
pub mod output;

pub use editor::{EditorResponse, EditorView};
pub use output::{OutputAction, OutputView};
