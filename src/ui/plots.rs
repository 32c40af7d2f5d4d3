use egui_plot::{Line, Plot, PlotPoints};

/// Value-over-time plot for one signal source.
pub fn time_plot(ui: &mut egui::Ui, title: &str, samples: &[[f64; 2]], y_min: f64, y_max: f64) {
    let points: PlotPoints = samples.iter().copied().collect();
    let line = Line::new(title, points);

    ui.vertical(|ui| {
        ui.label(title);

        Plot::new(title)
            .height(110.0)
            .allow_scroll(false)
            .allow_drag(false)
            .allow_zoom(false)
            .include_y(y_min)
            .include_y(y_max)
            .x_axis_formatter(|mark, _| format!("{:.0} s", mark.value))
            .y_axis_formatter(|mark, _| format!("{:.0}", mark.value))
            .show(ui, |plot_ui| {
                plot_ui.line(line);
            });
    });
}
