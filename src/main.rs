// ./src/main.rs
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_panorbit_camera::PanOrbitCameraPlugin;

// Eigene Module deklarieren
pub mod debug;
pub mod math;
pub mod physics;
pub mod setup; // Kamera, Licht und die Isofläche als Entity

use debug::{
    ui::simulation_control_ui_system,
    visualization::{
        lattice_grid::{
            debug_grid_visible, draw_inside_samples_gizmos, draw_lattice_grid_gizmos,
            draw_metaballs_gizmos,
        },
        normal_vector::{draw_surface_normals_system, surface_normals_visible},
    },
};
use math::algorithms::marching_cubes::{Lattice, SurfaceMesh};
use math::error::MathResult;
use physics::sim::resources::*;
use physics::sim::state::*;
use physics::sim::systems::*;
use setup::setup_scene;

fn main() -> MathResult<()> {
    let sim_params = SimulationParameters::default();
    // Ungültige Konfiguration bricht vor dem Start ab
    sim_params.validate()?;
    let lattice = Lattice::new(sim_params.grid_config())?;
    let metaballs = sim_params.metaballs_builder().build()?;

    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(EguiPlugin)
        .add_plugins(PanOrbitCameraPlugin)
        .init_resource::<ExecuteSingleStepRequest>()
        .init_resource::<SurfaceMesh>()
        .insert_resource(lattice)
        .insert_resource(MetaballSet(metaballs))
        .insert_resource(sim_params)
        .init_state::<SimulationState>()
        .add_systems(Startup, setup_scene)
        // --- Initialisierungsphase ---
        .add_systems(
            OnEnter(SimulationState::Initializing),
            (init_surface_system, finish_initialization_system).chain(),
        )
        .add_systems(
            Update,
            (
                // Block 1: UI und Anfrageverarbeitung
                simulation_control_ui_system,
                handle_simulation_requests_system,
                // Block 2: Metaballs bewegen und Isofläche neu extrahieren.
                // Läuft, wenn State Running ist ODER Paused mit SingleStepRequest.
                (advance_metaballs_system, rebuild_surface_system)
                    .chain()
                    .run_if(in_state(SimulationState::Running).or_else(
                        in_state(SimulationState::Paused).and_then(
                            bevy::ecs::schedule::common_conditions::resource_equals(
                                ExecuteSingleStepRequest(true),
                            ),
                        ),
                    )),
                clear_single_step_request_system,
                // Block 3: Ergebnis an den Renderer
                upload_surface_mesh_system,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (
                (
                    draw_lattice_grid_gizmos,
                    draw_inside_samples_gizmos,
                    draw_metaballs_gizmos,
                )
                    .run_if(debug_grid_visible),
                draw_surface_normals_system.run_if(surface_normals_visible),
            ),
        )
        .run();

    Ok(())
}
