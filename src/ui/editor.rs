//! Option Editor View
//!
//! The edit surface: target input, the option grid (flags / basics /
//! advanced), the live command preview, and the run button. Widgets bind
//! directly to the option set; the component reports whether anything
//! changed and whether a run was requested.

use eframe::egui::{self, RichText};

use crate::command::CommandSpec;
use crate::models::{OptionSection, ProbeOptions};

/// What the editor frame produced
#[derive(Debug, Default, Clone, Copy)]
pub struct EditorResponse {
    /// An option or the target was edited this frame
    pub changed: bool,
    /// The run button was pressed
    pub run_requested: bool,
}

/// Renders the option editing view
#[derive(Debug, Default)]
pub struct EditorView;

impl EditorView {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &mut self,
        ui: &mut egui::Ui,
        options: &mut ProbeOptions,
        preview: &CommandSpec,
        validation: Option<&str>,
    ) -> EditorResponse {
        let mut response = EditorResponse::default();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                response.changed |= Self::render_target(ui, options);
                ui.add_space(8.0);
                response.changed |= Self::render_option_grid(ui, options);
                ui.add_space(8.0);
                response.run_requested = Self::render_footer(ui, preview, validation);
            });

        response
    }

    fn render_target(ui: &mut egui::Ui, options: &mut ProbeOptions) -> bool {
        ui.heading("Target");
        let changed = ui
            .add(
                egui::TextEdit::singleline(&mut options.target)
                    .hint_text("e.g. google.com")
                    .desired_width(f32::INFINITY),
            )
            .changed();
        ui.label(
            RichText::new("The website address or IP you want to check connection to.")
                .weak()
                .italics()
                .small(),
        );
        changed
    }

    fn render_option_grid(ui: &mut egui::Ui, options: &mut ProbeOptions) -> bool {
        let mut changed = false;
        ui.columns(3, |columns| {
            columns[0].heading("Options");
            for flag in options.flags.iter_mut() {
                changed |= columns[0].checkbox(&mut flag.enabled, flag.label.as_str()).changed();
                columns[0].label(RichText::new(flag.help.as_str()).weak().italics().small());
            }

            columns[1].heading("Basics");
            columns[2].heading("Advanced");
            for value in options.values.iter_mut() {
                let column = match value.section {
                    OptionSection::Basics => &mut columns[1],
                    OptionSection::Advanced => &mut columns[2],
                };
                column.horizontal(|ui| {
                    ui.label(value.label.as_str());
                    changed |= ui
                        .add(
                            egui::TextEdit::singleline(&mut value.value)
                                .hint_text(value.placeholder.as_str())
                                .desired_width(64.0),
                        )
                        .changed();
                });
                column.label(RichText::new(value.help.as_str()).weak().italics().small());
            }
        });
        changed
    }

    fn render_footer(ui: &mut egui::Ui, preview: &CommandSpec, validation: Option<&str>) -> bool {
        ui.separator();
        ui.label(RichText::new("Command Preview:").weak().small());
        ui.label(RichText::new(&preview.display).monospace());

        if let Some(message) = validation {
            ui.colored_label(ui.visuals().error_fg_color, message);
        }

        ui.add_space(4.0);
        ui.add_sized(
            [ui.available_width(), 28.0],
            egui::Button::new(RichText::new("EXECUTE PING").strong()),
        )
        .clicked()
    }
}
