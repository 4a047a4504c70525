use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::export::EXPORT_FILE_NAME;
use crate::data::filter::MAX_MIN_SEARCH_VOLUME;
use crate::state::{AppState, Severity, StatusMessage};

// ---------------------------------------------------------------------------
// Left side panel – product info & filter widgets
// ---------------------------------------------------------------------------

/// Render the left parameter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Product Info & Filters");
    ui.separator();

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Product Title");
            changed |= ui
                .add(
                    egui::TextEdit::multiline(&mut state.params.title)
                        .desired_rows(3)
                        .desired_width(f32::INFINITY),
                )
                .changed();
            ui.add_space(6.0);

            // ---- Optional title source ----
            ui.label("…or fetch it from the product page URL");
            ui.horizontal(|ui: &mut Ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut state.product_url)
                        .hint_text("https://www.amazon.com/dp/…")
                        .desired_width(ui.available_width() - 90.0),
                );
                let fetching = state.fetching_title();
                if ui
                    .add_enabled(!fetching, egui::Button::new("Fetch title"))
                    .clicked()
                {
                    state.begin_title_fetch();
                }
                if fetching {
                    ui.spinner();
                }
            });
            ui.separator();

            ui.strong("Item Type (e.g., capsule, gummy, tablet)");
            changed |= ui
                .text_edit_singleline(&mut state.params.item_type)
                .changed();
            ui.add_space(6.0);

            ui.strong("Minimum Search Volume");
            changed |= ui
                .add(
                    egui::DragValue::new(&mut state.params.min_search_volume)
                        .range(0..=MAX_MIN_SEARCH_VOLUME)
                        .speed(10),
                )
                .changed();
            ui.add_space(6.0);

            ui.strong("Title Similarity Threshold (lower = wider match)");
            changed |= ui
                .add(egui::Slider::new(&mut state.params.similarity_threshold, 0..=100))
                .changed();
            ui.separator();

            // ---- Exclusion terms (read-only) ----
            let exclusions = state.exclusions();
            egui::CollapsingHeader::new(
                RichText::new(format!("Excluded item types ({})", exclusions.len())).strong(),
            )
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                if exclusions.is_empty() {
                    ui.label("None");
                    return;
                }
                ui.horizontal_wrapped(|ui: &mut Ui| {
                    for term in exclusions.iter() {
                        ui.label(RichText::new(term).monospace());
                    }
                });
            });
        });

    if changed {
        state.refilter();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.result.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export Excel…"))
                .clicked()
            {
                save_file_dialog(state, ExportFormat::Xlsx);
                ui.close_menu();
            }
            if ui
                .add_enabled(can_export, egui::Button::new("Export CSV…"))
                .clicked()
            {
                save_file_dialog(state, ExportFormat::Csv);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(table), Some(name)) = (&state.table, &state.source_name) {
            let kept = state.result.as_ref().map_or(0, |r| r.len());
            ui.label(format!("{name}: {} keywords loaded, {kept} relevant", table.len()));
            ui.separator();
        }

        if let Some(status) = &state.status {
            ui.label(status_text(status));
        }
    });
}

fn status_text(status: &StatusMessage) -> RichText {
    let text = RichText::new(status.text.as_str());
    match status.severity {
        Severity::Info => text,
        Severity::Advisory => text.color(Color32::from_rgb(220, 160, 0)),
        Severity::Error => text.color(Color32::RED),
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Upload Helium 10 CSV or Excel")
        .add_filter("Supported files", &["csv", "xlsx", "xlsm", "xls", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("Excel", &["xlsx", "xlsm", "xls"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows with columns {:?}",
                    table.len(),
                    table.column_names
                );
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                state.set_table(table, name);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status = Some(StatusMessage {
                    severity: Severity::Error,
                    text: format!("Error: {e:#}"),
                });
            }
        }
    }
}

#[derive(Clone, Copy)]
enum ExportFormat {
    Xlsx,
    Csv,
}

fn save_file_dialog(state: &mut AppState, format: ExportFormat) {
    let dialog = rfd::FileDialog::new().set_title("Download results");
    let dialog = match format {
        ExportFormat::Xlsx => dialog
            .set_file_name(EXPORT_FILE_NAME)
            .add_filter("Excel", &["xlsx"]),
        ExportFormat::Csv => dialog
            .set_file_name("relevant_keywords.csv")
            .add_filter("CSV", &["csv"]),
    };
    let Some(path) = dialog.save_file() else {
        return;
    };

    let outcome = match format {
        ExportFormat::Xlsx => state.export_xlsx(&path),
        ExportFormat::Csv => state.export_csv(&path),
    };
    if let Err(e) = outcome {
        log::error!("Export failed: {e:#}");
        state.status = Some(StatusMessage {
            severity: Severity::Error,
            text: format!("Export failed: {e:#}"),
        });
    }
}
