use eframe::egui::{self, Color32, RichText, Ui};
use penguin_dash::data::model::{BILL_DEPTH, BILL_LENGTH};
use penguin_dash::Session;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter controls");
    ui.separator();

    // ---- Mass ceiling ----
    ui.strong("Mass");
    let mut ceiling = state.session.filters().mass_ceiling;
    let slider = egui::Slider::new(&mut ceiling, state.config.mass_min()..=state.config.mass_max())
        .step_by(1.0)
        .suffix(" g");
    if ui.add(slider).changed() {
        state.session.set_mass_ceiling(ceiling);
    }
    ui.add_space(8.0);

    // ---- Species multi-select ----
    ui.strong("Species");
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.session.select_all_categories();
        }
        if ui.small_button("None").clicked() {
            state.session.select_no_categories();
        }
    });

    for species in &state.categories {
        let mut checked = state.session.filters().selected_categories.contains(species);
        let text = RichText::new(species).color(state.color_map.color_for(species));
        if ui.checkbox(&mut checked, text).changed() {
            state.session.toggle_category(species);
        }
    }

    ui.separator();
    if ui.button("Reset filters").clicked() {
        state.session.reset_filters();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with the visible-row status.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(&state.config.title);
        ui.separator();
        ui.label(status_line(&state.session));
    });
}

/// "N of M penguins visible" plus how many islands the data covers.
pub fn status_line(session: &Session) -> String {
    let dataset = session.dataset();
    format!(
        "{} of {} penguins visible ({} islands)",
        session.count(),
        dataset.len(),
        dataset.islands.len()
    )
}

// ---------------------------------------------------------------------------
// Value boxes – headline metrics
// ---------------------------------------------------------------------------

/// Render the three metric boxes above the plot and table.
pub fn value_boxes(ui: &mut Ui, state: &AppState) {
    let session = &state.session;
    let boxes = [
        ("Penguin Count", session.count().to_string()),
        (
            "Average Bill Length",
            format_mean(session.mean_of(BILL_LENGTH), "mm"),
        ),
        (
            "Average Bill Depth",
            format_mean(session.mean_of(BILL_DEPTH), "mm"),
        ),
    ];

    ui.columns(boxes.len(), |cols: &mut [Ui]| {
        for (ui, (label, value)) in cols.iter_mut().zip(boxes) {
            egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                ui.set_min_width(ui.available_width());
                ui.label(RichText::new(label).color(Color32::GRAY));
                ui.label(RichText::new(value).size(24.0).strong());
            });
        }
    });
}

/// Format a mean to one decimal place, or "no data" when undefined.
pub fn format_mean(mean: Option<f64>, unit: &str) -> String {
    match mean {
        Some(v) => format!("{v:.1} {unit}"),
        None => "no data".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use penguin_dash::data::{Dataset, FilterState, Record};

    use super::*;

    #[test]
    fn status_counts_visible_and_islands() {
        let heavy = Record {
            body_mass_g: Some(5200.0),
            ..Record::new("Gentoo", "Biscoe")
        };
        let light = Record {
            body_mass_g: Some(3300.0),
            ..Record::new("Adelie", "Torgersen")
        };
        let ds = Dataset::from_records(vec![heavy, light]);
        let mut session = Session::new(Arc::new(ds), FilterState::new(6000.0, ["Adelie", "Gentoo"]));
        session.set_mass_ceiling(4000.0);
        assert_eq!(status_line(&session), "1 of 2 penguins visible (2 islands)");
    }

    #[test]
    fn mean_formatting() {
        assert_eq!(format_mean(Some(42.5), "mm"), "42.5 mm");
        assert_eq!(format_mean(Some(43.921), "mm"), "43.9 mm");
        assert_eq!(format_mean(Some(0.0), "mm"), "0.0 mm");
        assert_eq!(format_mean(None, "mm"), "no data");
    }
}
