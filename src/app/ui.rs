use super::RedaxApp;
use super::StatusTone;
use crate::backend::{FileOutcome, OutputFormat};
use crate::utils::color::ColorExt;
use eframe::egui::{self, Color32, RichText};

const ACCENT: &str = "#0d9488";
const ERROR_TEXT: &str = "#f87171";
const MUTED_TEXT: &str = "#94a3b8";

fn hex(code: &str) -> Color32 {
    Color32::from_hex(code).unwrap_or(Color32::GRAY)
}

/// Background and text colour of the status bar for each tone.
fn tone_colors(tone: StatusTone) -> (Color32, Color32) {
    let (fill, text) = match tone {
        StatusTone::Idle => ("#1e293b", "#cbd5e1"),
        StatusTone::Info => ("#0369a1", "#e0f2fe"),
        StatusTone::Success => ("#15803d", "#dcfce7"),
        StatusTone::Warning => ("#b45309", "#fef3c7"),
        StatusTone::Error => ("#b91c1c", "#fee2e2"),
        StatusTone::Busy => ("#1d4ed8", "#dbeafe"),
    };
    (hex(fill), hex(text))
}

impl RedaxApp {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.add_space(6.0);
            self.render_footer(ui);
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    ui.heading("Redax");
                    ui.add_space(5.0);
                    ui.label(
                        RichText::new("Redact sensitive information from your documents")
                            .color(ui.visuals().text_color().gamma_multiply(0.7)),
                    );
                });

                ui.add_space(20.0);
                self.render_file_selection(ui);

                ui.add_space(15.0);
                self.render_patterns(ui);

                ui.add_space(15.0);
                self.render_options(ui);

                ui.add_space(20.0);
                self.render_actions(ui);

                ui.add_space(15.0);
                self.render_status(ui);

                if self.session.output_visible() {
                    ui.add_space(15.0);
                    self.render_results(ui);
                }

                ui.add_space(20.0);
            });
        });
    }

    fn render_file_selection(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.add_enabled_ui(!self.dialog_open, |ui| {
                    if ui.button("📁 Select Files").clicked() {
                        self.select_files();
                    }
                });
                ui.label(format!(
                    "{} / {} selected",
                    self.session.selected_files().len(),
                    self.session.max_files()
                ));
            });

            ui.add_space(6.0);
            if self.session.selected_files().is_empty() {
                ui.label(
                    RichText::new(self.session.file_list_placeholder())
                        .italics()
                        .color(hex(MUTED_TEXT)),
                );
            } else {
                for name in self.session.file_names() {
                    ui.label(format!("📄 {}", name));
                }
            }
        });
    }

    fn render_patterns(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            let Some(picker) = self.session.picker.as_mut() else {
                ui.label("Redaction options");
                ui.colored_label(hex(ERROR_TEXT), "Redaction options are unavailable.");
                return;
            };

            ui.label(format!("Redaction options ({} available)", picker.options().len()));
            ui.add_space(4.0);

            let mut removed = None;
            ui.horizontal_wrapped(|ui| {
                if picker.selected_keys().is_empty() {
                    ui.label(
                        RichText::new("Select redaction options...").color(hex(MUTED_TEXT)),
                    );
                }
                for key in picker.selected_keys() {
                    let label = picker.label_for(key).unwrap_or(key);
                    if ui
                        .button(format!("{} ✖", label))
                        .on_hover_text("Remove")
                        .clicked()
                    {
                        removed = Some(key.clone());
                    }
                }
            });
            if let Some(key) = removed {
                picker.remove(&key);
            }

            ui.add_space(4.0);
            ui.add(
                egui::TextEdit::singleline(&mut picker.search)
                    .hint_text("Search options...")
                    .desired_width(f32::INFINITY),
            );

            let mut chosen = None;
            egui::ScrollArea::vertical()
                .id_source("pattern_options")
                .max_height(140.0)
                .show(ui, |ui| {
                    for option in picker.matching() {
                        if ui
                            .selectable_label(false, &option.label)
                            .on_hover_text("Press to select")
                            .clicked()
                        {
                            chosen = Some(option.key.clone());
                        }
                    }
                });
            if let Some(key) = chosen {
                picker.toggle(&key);
            }
        });
    }

    fn render_options(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.label("Custom keywords (comma separated)");
            ui.add(
                egui::TextEdit::singleline(&mut self.session.custom_keywords)
                    .hint_text("e.g. Acme Corp, Project X")
                    .desired_width(f32::INFINITY),
            );

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label("Output format");
                egui::ComboBox::from_id_source("output_format")
                    .selected_text(self.session.output_format.label())
                    .show_ui(ui, |ui| {
                        for format in OutputFormat::ALL {
                            ui.selectable_value(
                                &mut self.session.output_format,
                                format,
                                format.label(),
                            );
                        }
                    });
            });
        });
    }

    fn render_actions(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(!self.session.is_processing(), |ui| {
                let button =
                    egui::Button::new("🛡 Process Files").min_size(egui::vec2(200.0, 40.0));
                if ui.add(button).clicked() {
                    self.process_files();
                }
            });

            ui.add_space(5.0);
            if ui.button("🔄 Reset").clicked() {
                self.reset();
            }
        });
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        let status = self.session.status();
        let (fill, text) = tone_colors(status.tone);

        egui::Frame::none()
            .fill(fill)
            .rounding(6.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    if status.busy {
                        ui.add(egui::Spinner::new().color(text));
                    }
                    ui.colored_label(text, &status.text);
                });
            });
    }

    fn render_results(&mut self, ui: &mut egui::Ui) {
        let mut download = None;

        ui.group(|ui| {
            ui.label(RichText::new("Processed files").strong());
            ui.add_space(6.0);

            egui::Frame::none()
                .fill(ui.style().visuals.extreme_bg_color)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    for (index, outcome) in self.session.results().iter().enumerate() {
                        ui.horizontal(|ui| match outcome {
                            FileOutcome::Processed { .. } => {
                                ui.label(outcome.summary());
                                let button = egui::Button::new(
                                    RichText::new("Download").color(Color32::WHITE),
                                )
                                .fill(hex(ACCENT));
                                if ui.add_enabled(!self.dialog_open, button).clicked() {
                                    download = Some(index);
                                }
                            }
                            FileOutcome::Failed { .. } => {
                                ui.colored_label(hex(ERROR_TEXT), outcome.summary());
                            }
                        });
                        ui.add_space(4.0);
                    }
                });
        });

        if let Some(index) = download {
            self.download(index);
        }
    }

    fn render_footer(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| match &self.backend_status {
            Some(status) if status.ready => {
                ui.colored_label(tone_colors(StatusTone::Success).0, &status.message);
            }
            Some(status) => {
                ui.colored_label(tone_colors(StatusTone::Warning).0, &status.message);
            }
            None => {
                ui.colored_label(hex(MUTED_TEXT), "Checking document converter...");
            }
        });
    }
}
