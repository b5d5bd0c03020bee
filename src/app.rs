// src/app.rs
use std::time::Instant;
use eframe::egui;
use rfd::FileDialog;

use crate::config::{AppSettings, SimulationConfig};
use crate::file::ExportFile;
use crate::state::AppState;
use crate::ui::controls::{self, ControlAction};

const CONFIG_KEY: &str = "simulation_config";

pub struct SimApp {
    state: AppState,
}

impl SimApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: AppSettings) -> Self {
        // Only the configuration survives restarts, never run data
        let config: SimulationConfig = cc.storage
            .and_then(|storage| eframe::get_value(storage, CONFIG_KEY))
            .unwrap_or_default();

        Self {
            state: AppState::new(settings, config),
        }
    }

    fn show_menu(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Export CSV...").clicked() {
                    self.export_csv();
                    ui.close_menu();
                }
                if ui.button("Reset").clicked() {
                    self.state.reset();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    ui.close_menu();
                }
            });
        });
    }

    fn export_csv(&mut self) {
        let file = match self.state.prepare_export() {
            Ok(Some(file)) => file,
            Ok(None) => return,
            Err(e) => {
                log::error!("Export failed: {:#}", e);
                self.state.error_message = Some(format!("Export failed: {}", e));
                return;
            }
        };

        let mut file_dialog = FileDialog::new()
            .add_filter("CSV files", &["csv"])
            .set_title("Export Samples")
            .set_file_name(file.file_name.as_str());
        if let Some(dir) = self.state.settings.export_dir() {
            file_dialog = file_dialog.set_directory(dir);
        }

        if let Some(path) = file_dialog.save_file() {
            self.save_export(&file, &path);
        }
    }

    fn save_export(&mut self, file: &ExportFile, path: &std::path::Path) {
        match file.write_to(path) {
            Ok(()) => {
                log::info!("Exported {} samples to {}", file.row_count(), path.display());
                self.state.notice = Some(format!(
                    "Exported {} samples to {}",
                    file.row_count(),
                    path.display()
                ));
            }
            Err(e) => {
                log::error!("Export failed: {:#}", e);
                self.state.error_message = Some(format!("{:#}", e));
            }
        }
    }

    fn show_messages(&mut self, ctx: &egui::Context) {
        let error_msg = self.state.error_message.clone();
        if let Some(error) = error_msg {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.state.error_message = None;
                    }
                });
        }

        let notice = self.state.notice.clone();
        if let Some(notice) = notice {
            egui::Window::new("Notice")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&notice);
                    if ui.button("OK").clicked() {
                        self.state.notice = None;
                    }
                });
        }
    }
}

impl eframe::App for SimApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Draw the next batch (or poll the pause flag) before rendering
        self.state.tick(Instant::now());

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.show_menu(ctx, ui);
        });

        egui::SidePanel::left("controls_panel")
            .resizable(false)
            .min_width(260.0)
            .show(ctx, |ui| {
                if controls::show_controls(ui, &mut self.state) == ControlAction::Export {
                    self.export_csv();
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let chart = self.state.simulator.chart_data();
            crate::ui::histogram::show_histogram(
                ui,
                &chart,
                self.state.simulator.outcomes().values(),
                self.state.show_overlay,
            );
        });

        self.show_messages(ctx);

        if let Some(due) = self.state.next_step_at {
            ctx.request_repaint_after(due.saturating_duration_since(Instant::now()));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, CONFIG_KEY, self.state.simulator.config());
    }
}
