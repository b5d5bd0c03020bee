// src/ui/controls.rs
use std::time::Instant;
use eframe::egui;
use crate::analysis::{RunPhase, RunSummary};
use crate::config::DistributionKind;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    None,
    Export,
}

pub fn show_controls(ui: &mut egui::Ui, state: &mut AppState) -> ControlAction {
    let mut action = ControlAction::None;
    let phase = state.simulator.phase();
    let busy = matches!(phase, RunPhase::Running | RunPhase::Paused);

    ui.heading("Distribution");
    ui.add_space(4.0);

    ui.add_enabled_ui(!busy, |ui| {
        let previous = state.inputs.distribution;
        egui::ComboBox::from_id_source("distribution_kind")
            .selected_text(state.inputs.distribution.label())
            .show_ui(ui, |ui| {
                for kind in DistributionKind::ALL {
                    ui.selectable_value(&mut state.inputs.distribution, kind, kind.label());
                }
            });
        if state.inputs.distribution != previous {
            state.apply_inputs();
        }

        ui.add_space(8.0);
        let mut edited = false;
        egui::Grid::new("simulation_inputs")
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                match state.inputs.distribution {
                    DistributionKind::Bernoulli => {
                        edited |= input_row(ui, "p:", &mut state.inputs.p);
                    },
                    DistributionKind::Dice => {
                        edited |= input_row(ui, "Sides:", &mut state.inputs.sides);
                    },
                    DistributionKind::Binomial => {
                        edited |= input_row(ui, "n:", &mut state.inputs.n);
                        edited |= input_row(ui, "p:", &mut state.inputs.p);
                    },
                }
                edited |= input_row(ui, "Trials:", &mut state.inputs.trial_count);
                edited |= input_row(ui, "Batch size:", &mut state.inputs.batch_size);
            });
        if edited {
            state.apply_inputs();
        }
    });

    ui.checkbox(&mut state.show_overlay, "Show theoretical overlay");

    ui.add_space(8.0);
    ui.separator();
    ui.add_space(8.0);

    ui.horizontal_wrapped(|ui| {
        if ui.add_enabled(!busy, egui::Button::new("⚡ Run Instant")).clicked() {
            state.run_instant();
        }
        if ui.add_enabled(!busy, egui::Button::new("▶ Run Animated")).clicked() {
            state.start_animated(Instant::now());
        }

        let pause_label = if phase == RunPhase::Paused { "▶ Resume" } else { "⏸ Pause" };
        if ui.add_enabled(busy, egui::Button::new(pause_label)).clicked() {
            state.toggle_pause();
        }

        if ui.button("⟲ Reset").clicked() {
            state.reset();
        }
        if ui.button("💾 Export CSV").clicked() {
            action = ControlAction::Export;
        }
    });

    ui.add_space(8.0);
    ui.separator();
    ui.add_space(8.0);

    let run = state.simulator.state();
    ui.label(format!("Status: {:?}", phase));
    ui.label(format!("Samples: {} / {}", run.completed, state.simulator.config().trial_count));
    if busy {
        let progress = run.completed as f32 / state.simulator.config().trial_count as f32;
        ui.add(egui::ProgressBar::new(progress).show_percentage());
    }

    ui.add_space(8.0);
    let summary = state.last_summary.clone().unwrap_or_else(|| state.simulator.summary());
    show_statistics(ui, &summary);

    action
}

fn input_row(ui: &mut egui::Ui, label: &str, value: &mut String) -> bool {
    ui.label(label);
    let response = ui.text_edit_singleline(value);
    ui.end_row();
    response.lost_focus()
}

fn show_statistics(ui: &mut egui::Ui, summary: &RunSummary) {
    ui.group(|ui| {
        ui.heading("Statistics");
        egui::Grid::new("statistics_grid")
            .num_columns(3)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                ui.label("");
                ui.label("Sample");
                ui.label("Theoretical");
                ui.end_row();

                ui.label("Mean");
                ui.label(format_stat(summary.sample_mean));
                ui.label(format!("{:.4}", summary.theoretical.mean));
                ui.end_row();

                ui.label("Variance");
                ui.label(format_stat(summary.sample_variance));
                ui.label(format!("{:.4}", summary.theoretical.variance));
                ui.end_row();

                ui.label("Std Dev");
                ui.label(format_stat(summary.sample_variance.map(f64::sqrt)));
                ui.label(format!("{:.4}", summary.theoretical.std_dev()));
                ui.end_row();
            });

        if let Some(error) = summary.mean_error() {
            ui.label(format!("Mean error: {:+.4}", error));
        }
    });
}

fn format_stat(value: Option<f64>) -> String {
    value.map(|v| format!("{:.4}", v)).unwrap_or_else(|| "–".to_string())
}
