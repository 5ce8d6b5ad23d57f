// ./src/debug/ui.rs
use crate::math::algorithms::marching_cubes::{Lattice, SurfaceMesh};
use crate::physics::sim::resources::{ExecuteSingleStepRequest, MetaballSet, SimulationParameters};
use crate::physics::sim::state::SimulationState;
use bevy::prelude::*;
use bevy_egui::{
    EguiContexts,
    egui::{self, Slider, Window},
};

pub fn simulation_control_ui_system(
    mut contexts: EguiContexts,
    mut sim_params: ResMut<SimulationParameters>,
    mut step_request: ResMut<ExecuteSingleStepRequest>,
    current_state: Res<State<SimulationState>>,
    surface: Res<SurfaceMesh>,
    lattice: Res<Lattice>,
    metaballs: Res<MetaballSet>,
) {
    Window::new("Simulationssteuerung")
        .default_width(320.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("Globale Steuerung");
            ui.label(format!("Zustand: {:?}", current_state.get()));

            ui.collapsing("Zeit & Geschwindigkeit", |ui| {
                ui.horizontal(|ui| {
                    if ui
                        .button(if sim_params.paused {
                            "▶ Play"
                        } else {
                            "⏸ Pause"
                        })
                        .clicked()
                    {
                        // Wird von handle_simulation_requests_system in den State umgesetzt
                        sim_params.paused = !sim_params.paused;
                    }
                    let can_step = *current_state.get() == SimulationState::Paused;
                    if ui
                        .add_enabled(can_step, egui::Button::new("Schritt Vorwärts ▶"))
                        .clicked()
                    {
                        step_request.0 = true;
                    }
                });
                ui.add(Slider::new(&mut sim_params.time_scale, 0.0..=4.0).text("Zeitfaktor"));
                ui.checkbox(&mut sim_params.parallel, "Parallel extrahieren");
            });

            ui.collapsing("Isofläche", |ui| {
                let stats = surface.stats;
                ui.label(format!("Isolevel: {:.3}", sim_params.isolevel));
                ui.label(format!("Metaballs: {}", metaballs.0.len()));
                ui.label(format!(
                    "Gitter: {}³ Zellen à {:.3}",
                    lattice.resolution(),
                    lattice.config().cell_width
                ));
                ui.separator();
                ui.label(format!("Voxel: {}", stats.voxels));
                ui.label(format!("Aktive Voxel: {}", stats.active_voxels));
                ui.label(format!("Dreiecke: {}", stats.triangles));
                ui.label(format!("Vertices: {}", surface.positions.len()));
            });

            ui.collapsing("Visualisierung & Debug", |ui| {
                if sim_params.visual_debug {
                    ui.checkbox(&mut sim_params.show_debug_grid, "Gitter & Metaballs anzeigen");
                    ui.checkbox(&mut sim_params.show_surface_normals, "Normalen anzeigen");
                    ui.add(
                        Slider::new(&mut sim_params.normal_arrow_length, 0.01..=1.0)
                            .text("Pfeillänge"),
                    );
                } else {
                    ui.label("Debug-Visualisierung ist deaktiviert (visual_debug).");
                }
            });

            ui.collapsing("Kamerasteuerung Info", |ui| {
                ui.label("Rechte Maustaste + Ziehen: Orbit");
                ui.label("Mittlere Maustaste + Ziehen: Pan");
                ui.label("Mausrad: Zoom");
            });
        });
}
