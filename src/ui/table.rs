use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Filtered data table
// ---------------------------------------------------------------------------

/// Render the filtered rows using the configured column layout.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    ui.strong("Penguin Data");

    let columns = &state.config.table_columns;
    let rows = state.session.project_for_table(columns);

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(60.0), columns.len())
        .header(ROW_HEIGHT + 4.0, |mut header| {
            for c in columns {
                header.col(|ui: &mut Ui| {
                    ui.strong(&c.display_name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let projected = &rows[row.index()];
                for value in projected.values() {
                    row.col(|ui: &mut Ui| {
                        ui.label(value.to_string());
                    });
                }
            });
        });
}
