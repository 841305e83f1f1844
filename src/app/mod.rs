//! Main application structure and state management
//!
//! `PingdeckApp` implements `eframe::App` and wires the surface to the
//! core: option edits recompute the command preview, the run action starts
//! an execution session, and the update loop drains session events from
//! the worker's channel. The egui thread is the sole mutator of view
//! state; process I/O happens on the app-owned tokio runtime.
//!
//! ## Threading
//!
//! ```text
//! ┌──────────────────┐          ┌───────────────────┐
//! │   UI Thread      │          │   Worker Task     │
//! │  (PingdeckApp)   │          │ (session worker)  │
//! │                  │          │                   │
//! │  pump() ◀──────────────────── events channel    │
//! │  request_cancel ────────────▶ cancel watch      │
//! └──────────────────┘          └───────────────────┘
//! ```
//!
//! At most one session worker is ever active: starting a new run first
//! cancels and awaits the previous one.

use std::sync::Arc;
use std::time::Duration;

use eframe::egui;
use tracing::{info, warn};

use crate::command::{self, CommandSpec};
use crate::config::Config;
use crate::error::Result;
use crate::exec::{ExecSettings, ExecutionSession, ProcessSpawner, TokioSpawner};
use crate::models::ProbeOptions;
use crate::ui::{EditorResponse, EditorView, OutputAction, OutputView};

/// Which view the surface is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Editor,
    Output,
}

/// Main pingdeck application
pub struct PingdeckApp {
    /// Runtime configuration
    config: Config,
    /// The editable option set
    options: ProbeOptions,
    /// Preview of the command the current options build
    preview: CommandSpec,
    /// Current view
    view: View,
    /// The live (or terminal) session; at most one exists
    session: Option<ExecutionSession>,
    /// Process-spawning seam; swapped for a double in tests
    spawner: Arc<dyn ProcessSpawner>,
    /// Validation message shown in the editor, if any
    validation: Option<String>,
    /// UI components
    editor: EditorView,
    output: OutputView,
    /// Whether visuals/fonts have been pushed to the egui context
    style_applied: bool,
    /// Tokio runtime for session workers.
    /// Kept alive for the life of the app so workers are never torn down
    /// mid-stream.
    runtime: tokio::runtime::Runtime,
}

impl PingdeckApp {
    /// Create the application with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        Self::with_spawner(config, Arc::new(TokioSpawner))
    }

    /// Create the application with a custom process spawner
    pub fn with_spawner(config: Config, spawner: Arc<dyn ProcessSpawner>) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        let options = ProbeOptions::standard();
        let preview = command::build(&options, &config.probe.program);

        Ok(Self {
            config,
            options,
            preview,
            view: View::Editor,
            session: None,
            spawner,
            validation: None,
            editor: EditorView::new(),
            output: OutputView::new(),
            style_applied: false,
            runtime,
        })
    }

    /// Recompute the command preview from the current options
    fn refresh_preview(&mut self) {
        self.preview = command::build(&self.options, &self.config.probe.program);
    }

    /// Validate the target and start a new run, replacing any live session
    fn start_run(&mut self) {
        self.refresh_preview();

        if !command::target_ready(&self.options) {
            warn!("run requested without a target");
            self.validation = Some("Target required!".to_string());
            return;
        }
        self.validation = None;

        // Exclusivity: the previous worker is cancelled and awaited before
        // a new child is created, so output can never interleave.
        self.discard_session();

        let settings = ExecSettings::from_config(&self.config.probe);
        match ExecutionSession::start(
            self.preview.clone(),
            Arc::clone(&self.spawner),
            settings,
            self.runtime.handle(),
        ) {
            Ok(session) => {
                self.session = Some(session);
                self.view = View::Output;
            }
            Err(e) => {
                warn!("failed to start run: {}", e);
                self.validation = Some(e.to_string());
            }
        }
    }

    /// Cancel (if needed) and discard the current session
    fn discard_session(&mut self) {
        if let Some(session) = self.session.take() {
            let grace = Duration::from_millis(self.config.probe.cancel_grace_ms);
            session.shutdown_blocking(self.runtime.handle(), grace);
        }
    }

    /// Return to the editor, cancelling a running session first
    fn back_to_editor(&mut self) {
        self.discard_session();
        self.view = View::Editor;
    }

    /// Drain pending session events; returns true while a session runs
    fn poll_session(&mut self) -> bool {
        if let Some(session) = self.session.as_mut() {
            session.pump();
            session.is_running()
        } else {
            false
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            match self.view {
                View::Output => self.back_to_editor(),
                View::Editor => {
                    info!("escape pressed in editor, closing");
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
        }
    }

    fn apply_style(&mut self, ctx: &egui::Context) {
        if self.style_applied {
            return;
        }
        self.style_applied = true;

        let visuals = if self.config.ui.theme == "light" {
            egui::Visuals::light()
        } else {
            egui::Visuals::dark()
        };
        ctx.set_visuals(visuals);

        let font_size = self.config.ui.font_size;
        ctx.style_mut(|style| {
            for font in style.text_styles.values_mut() {
                font.size = font.size.max(font_size * 0.8).min(font_size * 1.6);
            }
            if let Some(body) = style.text_styles.get_mut(&egui::TextStyle::Body) {
                body.size = font_size;
            }
            if let Some(mono) = style.text_styles.get_mut(&egui::TextStyle::Monospace) {
                mono.size = font_size;
            }
        });
    }

    fn show_editor(&mut self, ctx: &egui::Context) {
        let mut response = EditorResponse::default();
        egui::CentralPanel::default().show(ctx, |ui| {
            response = self.editor.render(
                ui,
                &mut self.options,
                &self.preview,
                self.validation.as_deref(),
            );
        });

        if response.changed {
            self.refresh_preview();
            self.validation = None;
        }
        if response.run_requested {
            self.start_run();
        }
    }

    fn show_output(&mut self, ctx: &egui::Context) {
        let mut action = OutputAction::None;
        egui::TopBottomPanel::top("output-status").show(ctx, |ui| {
            action = self.output.render_status(ui, self.session.as_ref());
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.output.render_log(ui, self.session.as_ref());
        });

        match action {
            OutputAction::Stop => {
                if let Some(session) = &self.session {
                    info!("stop requested");
                    session.request_cancel();
                }
            }
            OutputAction::Back => self.back_to_editor(),
            OutputAction::None => {}
        }
    }
}

impl eframe::App for PingdeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_style(ctx);
        let streaming = self.poll_session();
        self.handle_keys(ctx);

        match self.view {
            View::Editor => self.show_editor(ctx),
            View::Output => self.show_output(ctx),
        }

        // Keep the log view fresh while output streams in; otherwise the
        // surface repaints only on interaction.
        if streaming {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }

    // Rendering is driven entirely from `update`, which eframe invokes with
    // the viewport context before this method. The required `ui` hook is left
    // empty so the trait is satisfied without a second paint pass.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}
}

impl Drop for PingdeckApp {
    fn drop(&mut self) {
        // A probe child must not outlive the surface.
        self.discard_session();
    }
}
