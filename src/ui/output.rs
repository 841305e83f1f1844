//! Output View
//!
//! The run surface: a status header with stop/back controls and the
//! scrolling log of the live session. Lines are colored by kind and the
//! view sticks to the bottom while output streams in.

use eframe::egui::{self, Color32, RichText};

use crate::exec::{ExecutionSession, SessionState};
use crate::models::{LineKind, LogLine};

/// User intent reported by the output view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputAction {
    None,
    /// Cancel the running probe
    Stop,
    /// Return to the editor view
    Back,
}

/// Renders the live output view
#[derive(Debug, Default)]
pub struct OutputView;

impl OutputView {
    pub fn new() -> Self {
        Self
    }

    /// Status header: session state plus the stop/back controls
    pub fn render_status(
        &mut self,
        ui: &mut egui::Ui,
        session: Option<&ExecutionSession>,
    ) -> OutputAction {
        let mut action = OutputAction::None;

        ui.horizontal(|ui| {
            match session {
                Some(session) => {
                    ui.label(RichText::new(session.display()).monospace());
                    ui.separator();
                    ui.label(Self::state_text(session));
                }
                None => {
                    ui.label(RichText::new("no session").weak());
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Back").clicked() {
                    action = OutputAction::Back;
                }
                let running = session.map(|s| s.is_running()).unwrap_or(false);
                if ui.add_enabled(running, egui::Button::new("Stop")).clicked() {
                    action = OutputAction::Stop;
                }
            });
        });

        action
    }

    /// The scrolling log body
    pub fn render_log(&mut self, ui: &mut egui::Ui, session: Option<&ExecutionSession>) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if let Some(session) = session {
                    for line in session.lines() {
                        ui.label(Self::line_text(ui, line));
                    }
                }
            });
    }

    fn state_text(session: &ExecutionSession) -> RichText {
        match session.state() {
            SessionState::Running => RichText::new("running").color(Color32::LIGHT_GREEN),
            SessionState::Completed => RichText::new("finished").weak(),
            SessionState::Failed => RichText::new("failed").color(Color32::LIGHT_RED),
        }
    }

    fn line_text(ui: &egui::Ui, line: &LogLine) -> RichText {
        let text = RichText::new(line.sanitized()).monospace();
        match line.kind {
            LineKind::Output => text,
            LineKind::Notice => text.color(Color32::LIGHT_GREEN),
            LineKind::Error => text.color(ui.visuals().error_fg_color),
        }
    }
}
