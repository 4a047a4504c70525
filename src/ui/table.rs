use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::export::OUTPUT_HEADERS;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Results table (central panel)
// ---------------------------------------------------------------------------

/// Render the relevant keywords, or a prompt when there is nothing to show.
pub fn results_table(ui: &mut Ui, state: &AppState) {
    ui.heading("Amazon Keyword Relevance Filter (Helium 10 Style)");
    ui.separator();

    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("Upload a Helium 10 CSV or XLSX to get started.  (File → Open…)");
        });
        return;
    }

    // Blocked runs have their message in the top bar.
    let Some(result) = &state.result else {
        return;
    };

    if state.table.as_ref().is_some_and(|t| t.is_empty()) {
        ui.label("The uploaded file has a header but no keyword rows.");
        return;
    }

    ui.label(RichText::new(result.summary()).strong());
    ui.add_space(4.0);

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::remainder().at_least(200.0))
        .column(Column::auto().at_least(110.0))
        .header(22.0, |mut header| {
            for title in OUTPUT_HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(20.0, result.matches.len(), |mut row| {
                let m = &result.matches[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(m.phrase.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(m.search_volume.to_string());
                });
            });
        });
}
