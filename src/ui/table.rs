use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use pokedash::data::model::{Pokemon, Stat};
use pokedash::data::stats::stat_total;

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

fn cell_text(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "–".to_string())
}

/// Render the filtered records as a table.
pub fn record_table(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }
    let rows: Vec<&Pokemon> = state.visible().collect();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(40.0))
        .column(Column::auto().at_least(120.0))
        .columns(Column::auto().at_least(70.0), 3)
        .columns(Column::auto().at_least(50.0), Stat::ALL.len() + 1)
        .column(Column::remainder())
        .header(ROW_HEIGHT + 4.0, |mut header| {
            let mut heading = |text: &str| {
                header.col(|ui| {
                    ui.label(RichText::new(text).strong());
                });
            };
            heading("#");
            heading("Name");
            heading("Type 1");
            heading("Type 2");
            heading("Gen");
            for stat in Stat::ALL {
                heading(stat.label());
            }
            heading("Total");
            heading("Sprite");
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let p = rows[row.index()];
                row.col(|ui| {
                    ui.label(p.id.to_string());
                });
                row.col(|ui| {
                    ui.label(&p.name);
                });
                row.col(|ui| {
                    ui.label(p.primary_type.as_deref().unwrap_or("–"));
                });
                row.col(|ui| {
                    ui.label(p.secondary_type.as_deref().unwrap_or("–"));
                });
                row.col(|ui| {
                    ui.label(p.generation.to_string());
                });
                for stat in Stat::ALL {
                    row.col(|ui| {
                        ui.label(cell_text(p.stat(stat)));
                    });
                }
                row.col(|ui| {
                    ui.label(stat_total(p).to_string());
                });
                row.col(|ui| {
                    ui.hyperlink_to("sprite", &p.image_url);
                });
            });
        });
}
