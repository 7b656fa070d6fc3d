use std::collections::BTreeMap;

use eframe::egui::Ui;
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Scatter plot
// ---------------------------------------------------------------------------

/// Render the x/y scatter, one series per species.
pub fn scatter_plot(ui: &mut Ui, state: &AppState) {
    ui.strong("Bill Length vs. Depth");

    let (x_label, y_label) = state.session.plot_axes();

    // Group points so each species becomes one legend entry.
    let mut groups: BTreeMap<String, Vec<[f64; 2]>> = BTreeMap::new();
    for p in state.session.project_for_plot() {
        groups.entry(p.group).or_default().push([p.x, p.y]);
    }

    Plot::new("scatter_plot")
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (group, coords) in groups {
                let color = state.color_map.color_for(&group);
                let points = Points::new(PlotPoints::from(coords))
                    .name(&group)
                    .color(color)
                    .radius(3.0);
                plot_ui.points(points);
            }
        });
}
