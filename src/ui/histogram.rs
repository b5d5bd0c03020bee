// src/ui/histogram.rs
use eframe::egui;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};
use crate::analysis::ChartData;

/// Draws observed counts as bars at each outcome value, optionally with the
/// expected counts for the same number of samples.
pub fn show_histogram(ui: &mut egui::Ui, chart: &ChartData, positions: &[u32], show_overlay: bool) {
    let bars: Vec<Bar> = chart.counts.iter()
        .zip(positions)
        .zip(&chart.labels)
        .map(|((count, x), label)| {
            Bar::new(*x as f64, *count as f64)
                .name(label)
                .width(0.8)
                .fill(egui::Color32::from_rgb(100, 150, 255))
        })
        .collect();

    let expected: Vec<[f64; 2]> = chart.expected.iter()
        .zip(positions)
        .map(|(e, x)| [*x as f64, *e])
        .collect();

    Plot::new("distribution_histogram")
        .height(ui.available_height())
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show_background(false)
        .include_y(0.0)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Observed"));

            if show_overlay {
                plot_ui.line(
                    Line::new(PlotPoints::from(expected.clone()))
                        .name("Theoretical")
                        .color(egui::Color32::RED)
                        .width(2.0)
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(expected))
                        .name("Theoretical")
                        .color(egui::Color32::RED)
                        .radius(3.0)
                );
            }
        });
}
