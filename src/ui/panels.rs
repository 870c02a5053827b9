use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use pokedash::data::filter::ALL;
use pokedash::data::model::Stat;

use crate::state::{AppState, ColorBy, View};

// ---------------------------------------------------------------------------
// Left side panel – selector widgets
// ---------------------------------------------------------------------------

/// Render the left selector panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Own a handle to the table so `state` can be mutated below.
    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Generation ----
            ui.strong("Generation");
            let mut generation = state.filter.generation;
            egui::ComboBox::from_id_salt("generation")
                .selected_text(generation.map_or(ALL.to_string(), |g| g.to_string()))
                .show_ui(ui, |ui: &mut Ui| {
                    ui.selectable_value(&mut generation, None, ALL);
                    for &g in &dataset.generations {
                        ui.selectable_value(&mut generation, Some(g), g.to_string());
                    }
                });
            state.set_generation(generation);

            // ---- Type ----
            ui.strong("Type");
            let mut pokemon_type = state.filter.pokemon_type.clone();
            egui::ComboBox::from_id_salt("pokemon_type")
                .selected_text(pokemon_type.as_deref().unwrap_or(ALL))
                .show_ui(ui, |ui: &mut Ui| {
                    ui.selectable_value(&mut pokemon_type, None, ALL);
                    for t in &dataset.types {
                        ui.selectable_value(&mut pokemon_type, Some(t.clone()), t.as_str());
                    }
                });
            state.set_type(pokemon_type);
            ui.separator();

            // ---- Scatter axes ----
            if state.view == View::Scatter {
                stat_selector(ui, "x_axis", "X axis", &mut state.x_stat);
                stat_selector(ui, "y_axis", "Y axis", &mut state.y_stat);

                ui.strong("Color by");
                let mut color_by = state.color_by;
                egui::ComboBox::from_id_salt("color_by")
                    .selected_text(color_by.label())
                    .show_ui(ui, |ui: &mut Ui| {
                        for option in [ColorBy::PrimaryType, ColorBy::Generation] {
                            ui.selectable_value(&mut color_by, option, option.label());
                        }
                    });
                state.set_color_by(color_by);

                if let Some(cm) = &state.color_map {
                    egui::CollapsingHeader::new(RichText::new("Legend").strong())
                        .default_open(false)
                        .show(ui, |ui: &mut Ui| {
                            for (label, color) in cm.legend_entries() {
                                ui.label(RichText::new(label).color(color));
                            }
                        });
                }
                ui.separator();
            }

            // ---- Averages over the selection ----
            ui.strong("Average stats");
            egui::Grid::new("averages").striped(true).show(ui, |ui: &mut Ui| {
                for stat in Stat::ALL {
                    ui.label(stat.label());
                    ui.label(format!("{:.1}", state.averages[&stat]));
                    ui.end_row();
                }
            });
        });
}

fn stat_selector(ui: &mut Ui, id: &str, title: &str, selected: &mut Stat) {
    ui.strong(title);
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected.label())
        .show_ui(ui, |ui: &mut Ui| {
            for stat in Stat::ALL {
                ui.selectable_value(selected, stat, stat.label());
            }
        });
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
        });

        ui.separator();

        for view in View::ALL {
            ui.selectable_value(&mut state.view, view, view.label());
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} pokémon loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open pokédex")
        .add_filter("Supported files", &["csv", "tsv", "json", "parquet", "pq"])
        .add_filter("CSV / TSV", &["csv", "tsv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
