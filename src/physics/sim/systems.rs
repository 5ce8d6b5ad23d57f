use super::resources::{
    ExecuteSingleStepRequest, MetaballSet, SimulationParameters, SurfaceMeshHandle,
};
use super::state::SimulationState;
use crate::math::algorithms::marching_cubes::{Lattice, MarchingCubes, SurfaceMesh};
use crate::math::geometry::metaballs::MetaballField;
use bevy::prelude::*;
use bevy::tasks::{ComputeTaskPool, TaskPool};

/// Zeitschritt eines manuellen Einzelschritts im pausierten Zustand.
pub const SINGLE_STEP_SECONDS: f32 = 1.0 / 60.0;

/// Erzeugt die erste Isofläche, damit schon im ersten Frame etwas sichtbar ist.
pub fn init_surface_system(
    sim_params: Res<SimulationParameters>,
    metaballs: Res<MetaballSet>,
    mut lattice: ResMut<Lattice>,
    mut surface: ResMut<SurfaceMesh>,
) {
    info!(
        "Lattice ready: {}³ = {} voxels, cell width {:.3}, bounds {:?}",
        lattice.resolution(),
        lattice.len(),
        lattice.config().cell_width,
        lattice.bounds()
    );
    if metaballs.0.is_empty() {
        warn!("No metaballs configured, the surface will stay empty.");
    }
    let field = MetaballField::new(&metaballs.0);
    *surface = MarchingCubes::extract(&mut lattice, &field, sim_params.isolevel);
    info!(
        "Initial surface: {} voxels, {} metaballs, {} triangles",
        surface.stats.voxels,
        metaballs.0.len(),
        surface.stats.triangles
    );
}

pub fn finish_initialization_system(
    sim_params: Res<SimulationParameters>,
    mut next_state: ResMut<NextState<SimulationState>>,
) {
    let target = if sim_params.paused {
        SimulationState::Paused
    } else {
        SimulationState::Running
    };
    next_state.set(target);
    info!("Initialization complete, simulation is {:?}.", target);
}

/// Übersetzt das `paused`-Flag (UI) in Zustandswechsel.
pub fn handle_simulation_requests_system(
    sim_params: Res<SimulationParameters>,
    current_state: Res<State<SimulationState>>,
    mut next_state: ResMut<NextState<SimulationState>>,
) {
    match (current_state.get(), sim_params.paused) {
        (SimulationState::Running, true) => {
            next_state.set(SimulationState::Paused);
            info!("Simulation paused.");
        }
        (SimulationState::Paused, false) => {
            next_state.set(SimulationState::Running);
            info!("Simulation resumed.");
        }
        _ => {}
    }
}

/// Bewegt alle Metaballs und reflektiert sie an den Grenzen des Bewegungsraums.
pub fn advance_metaballs_system(
    time: Res<Time>,
    sim_params: Res<SimulationParameters>,
    current_state: Res<State<SimulationState>>,
    mut metaballs: ResMut<MetaballSet>,
) {
    let dt = match current_state.get() {
        SimulationState::Paused => SINGLE_STEP_SECONDS,
        _ => time.delta_seconds(),
    } * sim_params.time_scale;

    for ball in metaballs.0.iter_mut() {
        ball.advance(dt, sim_params.grid_width);
    }
}

/// Tastet das Gitter neu ab und baut die Isofläche komplett neu auf.
pub fn rebuild_surface_system(
    sim_params: Res<SimulationParameters>,
    metaballs: Res<MetaballSet>,
    mut lattice: ResMut<Lattice>,
    mut surface: ResMut<SurfaceMesh>,
) {
    let field = MetaballField::new(&metaballs.0);
    *surface = if sim_params.parallel {
        let pool = ComputeTaskPool::get_or_init(TaskPool::default);
        MarchingCubes::extract_parallel(&mut lattice, &field, sim_params.isolevel, pool)
    } else {
        MarchingCubes::extract(&mut lattice, &field, sim_params.isolevel)
    };
    debug!(
        "Surface rebuilt: {} active voxels, {} triangles",
        surface.stats.active_voxels, surface.stats.triangles
    );
}

pub fn clear_single_step_request_system(mut step_request: ResMut<ExecuteSingleStepRequest>) {
    if step_request.0 {
        step_request.0 = false;
    }
}

/// Ersetzt das Mesh-Asset, sobald eine neue Isofläche vorliegt.
pub fn upload_surface_mesh_system(
    surface: Res<SurfaceMesh>,
    handle: Option<Res<SurfaceMeshHandle>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    if !surface.is_changed() {
        return;
    }
    let Some(handle) = handle else {
        warn!("Surface changed, but no SurfaceMeshHandle is registered.");
        return;
    };
    match meshes.get_mut(&handle.0) {
        Some(mesh) => *mesh = surface.to_bevy_mesh(),
        None => warn!("Surface mesh asset {:?} is missing, frame not uploaded.", handle.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::geometry::metaballs::Metaball;
    use bevy::ecs::system::RunSystemOnce;
    use bevy::render::{render_asset::RenderAssetUsages, render_resource::PrimitiveTopology};

    fn world_with(params: SimulationParameters, balls: Vec<Metaball>) -> World {
        let mut world = World::new();
        world.insert_resource(Lattice::new(params.grid_config()).unwrap());
        world.insert_resource(params);
        world.insert_resource(MetaballSet(balls));
        world.init_resource::<SurfaceMesh>();
        world.init_resource::<ExecuteSingleStepRequest>();
        world.init_resource::<Time>();
        world
    }

    fn small_params(parallel: bool) -> SimulationParameters {
        SimulationParameters {
            grid_res: 10,
            grid_cell_width: 0.4,
            grid_width: 4.0,
            parallel,
            ..default()
        }
    }

    fn centered_ball() -> Vec<Metaball> {
        vec![Metaball::new(Vec3::splat(2.0), Vec3::new(3.0, 0.0, 0.0), 1.0)]
    }

    #[test]
    fn test_rebuild_produces_surface() {
        for parallel in [false, true] {
            let mut world = world_with(small_params(parallel), centered_ball());
            world.run_system_once(rebuild_surface_system);
            let surface = world.resource::<SurfaceMesh>();
            assert!(!surface.is_empty());
            assert_eq!(surface.stats.voxels, 1000);
        }
    }

    #[test]
    fn test_rebuild_uses_configured_isolevel() {
        let max_distance = |isolevel: f32| {
            let mut world = world_with(
                SimulationParameters {
                    isolevel,
                    ..small_params(false)
                },
                centered_ball(),
            );
            world.run_system_once(rebuild_surface_system);
            world
                .resource::<SurfaceMesh>()
                .positions
                .iter()
                .map(|p| Vec3::from(*p).distance(Vec3::splat(2.0)))
                .fold(0.0f32, f32::max)
        };
        // r²/d² = iso: Radius 1.0 bei Isolevel 1, 1/sqrt(2) bei Isolevel 2
        assert!(max_distance(1.0) > 0.9);
        assert!(max_distance(2.0) < 0.8);
    }

    #[test]
    fn test_initialization_builds_surface_and_picks_state() {
        for (paused, expected) in [
            (false, SimulationState::Running),
            (true, SimulationState::Paused),
        ] {
            let mut world = world_with(
                SimulationParameters {
                    paused,
                    ..small_params(false)
                },
                centered_ball(),
            );
            world.init_resource::<NextState<SimulationState>>();
            world.run_system_once(init_surface_system);
            world.run_system_once(finish_initialization_system);

            assert!(!world.resource::<SurfaceMesh>().is_empty());
            assert_eq!(world.resource::<NextState<SimulationState>>().0, Some(expected));
        }
    }

    fn world_with_mesh_asset() -> (World, Handle<Mesh>) {
        let mut world = world_with(small_params(false), centered_ball());
        world.init_resource::<Assets<Mesh>>();
        let handle = world
            .resource_mut::<Assets<Mesh>>()
            .add(Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default()));
        world.insert_resource(SurfaceMeshHandle(handle.clone()));
        (world, handle)
    }

    #[test]
    fn test_upload_replaces_mesh_asset() {
        let (mut world, handle) = world_with_mesh_asset();
        world.run_system_once(rebuild_surface_system);
        world.run_system_once(upload_surface_mesh_system);

        let expected = world.resource::<SurfaceMesh>().positions.len();
        assert!(expected > 0);
        let meshes = world.resource::<Assets<Mesh>>();
        let mesh = meshes.get(&handle).expect("mesh asset exists");
        assert_eq!(mesh.count_vertices(), expected);
        assert_eq!(
            mesh.indices().map(|i| i.len()),
            Some(world.resource::<SurfaceMesh>().indices.len())
        );
    }

    #[test]
    fn test_upload_tolerates_missing_asset() {
        let (mut world, handle) = world_with_mesh_asset();
        world.resource_mut::<Assets<Mesh>>().remove(&handle);
        world.run_system_once(rebuild_surface_system);
        world.run_system_once(upload_surface_mesh_system);
        assert!(world.resource::<Assets<Mesh>>().get(&handle).is_none());
    }

    #[test]
    fn test_paused_step_uses_fixed_dt() {
        let mut world = world_with(small_params(false), centered_ball());
        world.insert_resource(State::new(SimulationState::Paused));
        world.run_system_once(advance_metaballs_system);
        let ball = world.resource::<MetaballSet>().0[0];
        assert!((ball.position.x - (2.0 + 3.0 * SINGLE_STEP_SECONDS)).abs() < 1e-6);
    }

    #[test]
    fn test_running_without_elapsed_time_does_not_move() {
        let mut world = world_with(small_params(false), centered_ball());
        world.insert_resource(State::new(SimulationState::Running));
        world.run_system_once(advance_metaballs_system);
        assert_eq!(world.resource::<MetaballSet>().0[0].position, Vec3::splat(2.0));
    }

    #[test]
    fn test_pause_request_changes_state() {
        let mut world = world_with(
            SimulationParameters {
                paused: true,
                ..small_params(false)
            },
            Vec::new(),
        );
        world.insert_resource(State::new(SimulationState::Running));
        world.init_resource::<NextState<SimulationState>>();
        world.run_system_once(handle_simulation_requests_system);
        assert_eq!(
            world.resource::<NextState<SimulationState>>().0,
            Some(SimulationState::Paused)
        );
    }

    #[test]
    fn test_single_step_request_is_cleared() {
        let mut world = world_with(small_params(false), Vec::new());
        world.insert_resource(ExecuteSingleStepRequest(true));
        world.run_system_once(clear_single_step_request_system);
        assert_eq!(
            *world.resource::<ExecuteSingleStepRequest>(),
            ExecuteSingleStepRequest(false)
        );
    }
}
