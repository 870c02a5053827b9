use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use pokedash::data::model::Stat;

use crate::state::AppState;

fn placeholder(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Open a pokédex file to start  (File → Open…)");
    });
}

// ---------------------------------------------------------------------------
// Scatter plot: one stat against another
// ---------------------------------------------------------------------------

/// One hoverable marker.
struct Marker {
    x: f64,
    y: f64,
    label: String,
}

/// Render the stat scatter plot in the central panel.
pub fn scatter_plot(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        placeholder(ui);
        return;
    }

    let (x_stat, y_stat) = (state.x_stat, state.y_stat);

    // Group by colour category so each category gets one legend entry.
    let mut series: BTreeMap<String, Vec<[f64; 2]>> = BTreeMap::new();
    let mut markers = Vec::new();
    for p in state.visible() {
        // Records lacking either stat have no position on this chart.
        let (Some(x), Some(y)) = (p.stat(x_stat), p.stat(y_stat)) else {
            continue;
        };
        let (x, y) = (f64::from(x), f64::from(y));
        series
            .entry(state.color_by.category(p))
            .or_default()
            .push([x, y]);
        markers.push(Marker {
            x,
            y,
            label: format!("#{} {}\n{}", p.id, p.name, p.image_url),
        });
    }

    Plot::new("stat_scatter")
        .legend(Legend::default())
        .x_axis_label(x_stat.label())
        .y_axis_label(y_stat.label())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(move |_name, value| hover_label(&markers, value, x_stat, y_stat))
        .show(ui, |plot_ui| {
            for (category, points) in series {
                let color = state
                    .color_map
                    .as_ref()
                    .map(|cm| cm.color_for(&category))
                    .unwrap_or(Color32::LIGHT_BLUE);
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(&category)
                        .color(color)
                        .radius(4.0),
                );
            }
        });
}

/// Names every record sitting exactly on the hovered point.
fn hover_label(markers: &[Marker], value: &PlotPoint, x_stat: Stat, y_stat: Stat) -> String {
    let hits: Vec<&str> = markers
        .iter()
        .filter(|m| m.x == value.x && m.y == value.y)
        .map(|m| m.label.as_str())
        .collect();
    let coords = format!("{}: {:.0}\n{}: {:.0}", x_stat.label(), value.x, y_stat.label(), value.y);
    if hits.is_empty() {
        coords
    } else {
        format!("{}\n{coords}", hits.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// Radar chart: average of each stat over the selection
// ---------------------------------------------------------------------------

/// Angle of the spoke for the `i`-th stat, starting at 12 o'clock and going
/// clockwise.
fn spoke_angle(i: usize) -> f64 {
    FRAC_PI_2 - i as f64 * TAU / Stat::ALL.len() as f64
}

/// Polygon vertices for `averages`, each spoke scaled so `scale` maps to 1.0.
pub fn radar_vertices(averages: &BTreeMap<Stat, f64>, scale: f64) -> Vec<[f64; 2]> {
    Stat::ALL
        .iter()
        .enumerate()
        .map(|(i, stat)| {
            let r = averages.get(stat).copied().unwrap_or(0.0) / scale;
            let a = spoke_angle(i);
            [r * a.cos(), r * a.sin()]
        })
        .collect()
}

/// Outer ring value: the largest average rounded up to the next 10.
pub fn radar_scale(averages: &BTreeMap<Stat, f64>) -> f64 {
    let max = averages.values().copied().fold(0.0, f64::max);
    ((max / 10.0).ceil() * 10.0).max(10.0)
}

/// Render the average-stats radar chart.
pub fn radar_plot(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        placeholder(ui);
        return;
    }

    let scale = radar_scale(&state.averages);
    let vertices = radar_vertices(&state.averages, scale);
    let title = format!("Average stats over {} pokémon", state.visible_indices.len());

    Plot::new("stat_radar")
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show_x(false)
        .show_y(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            // Grid rings at 25 % steps.
            for ring in [0.25, 0.5, 0.75, 1.0] {
                let pts: PlotPoints = (0..=Stat::ALL.len())
                    .map(|i| {
                        let a = spoke_angle(i);
                        [ring * a.cos(), ring * a.sin()]
                    })
                    .collect();
                plot_ui.line(Line::new(pts).color(Color32::DARK_GRAY).width(0.5));
            }

            for (i, stat) in Stat::ALL.iter().enumerate() {
                let a = spoke_angle(i);
                let spoke = PlotPoints::from(vec![[0.0, 0.0], [a.cos(), a.sin()]]);
                plot_ui.line(Line::new(spoke).color(Color32::DARK_GRAY).width(0.5));

                let avg = state.averages.get(stat).copied().unwrap_or(0.0);
                plot_ui.text(Text::new(
                    PlotPoint::new(1.18 * a.cos(), 1.12 * a.sin()),
                    format!("{}\n{avg:.1}", stat.label()),
                ));
            }

            plot_ui.polygon(
                Polygon::new(PlotPoints::from(vertices))
                    .name(&title)
                    .fill_color(Color32::from_rgba_unmultiplied(100, 160, 255, 90))
                    .stroke(Stroke::new(2.0, Color32::LIGHT_BLUE)),
            );

            plot_ui.text(Text::new(PlotPoint::new(0.0, -1.3), format!("outer ring = {scale:.0}")));
        });
}
