// src/debug/visualization/lattice_grid.rs
use crate::math::algorithms::marching_cubes::Lattice;
use crate::math::types::{Bounds3D, Vec3};
use crate::physics::sim::resources::{MetaballSet, SimulationParameters};
use bevy::prelude::*;

/// Oberhalb dieser Auflösung werden nur die Außenkanten gezeichnet.
const MAX_RESOLUTION_FOR_CELL_LINES: usize = 32;

/// Run-Condition für alle Gitter-Gizmos.
pub fn debug_grid_visible(sim_params: Res<SimulationParameters>) -> bool {
    sim_params.debug_grid_visible()
}

/// Zeichnet Gitterbegrenzung, Zelllinien und den Bewegungsraum der Metaballs.
pub fn draw_lattice_grid_gizmos(
    mut gizmos: Gizmos,
    lattice: Res<Lattice>,
    sim_params: Res<SimulationParameters>,
) {
    let bounds = lattice.bounds();
    let bounds_color = Color::rgba(1.0, 1.0, 1.0, 0.8);
    let cell_color = Color::rgba(0.0, 0.5, 1.0, 0.15);

    draw_bounds(&mut gizmos, &bounds, bounds_color);

    // Bewegungsraum nur, wenn er vom Gitter abweicht
    if let Ok(domain) = Bounds3D::cube(Vec3::ZERO, sim_params.grid_width) {
        let deviation = (domain.min - bounds.min).abs() + (domain.max - bounds.max).abs();
        if deviation.max_element() > 1e-4 {
            draw_bounds(&mut gizmos, &domain, Color::ORANGE);
        }
    }

    let n = lattice.resolution();
    if n > MAX_RESOLUTION_FOR_CELL_LINES {
        return;
    }
    let origin = bounds.min;
    let cell = lattice.config().cell_width;
    let extent = cell * n as f32;
    for a in 0..=n {
        for b in 0..=n {
            let (u, v) = (a as f32 * cell, b as f32 * cell);
            gizmos.line(
                origin + Vec3::new(0.0, u, v),
                origin + Vec3::new(extent, u, v),
                cell_color,
            );
            gizmos.line(
                origin + Vec3::new(u, 0.0, v),
                origin + Vec3::new(u, extent, v),
                cell_color,
            );
            gizmos.line(
                origin + Vec3::new(u, v, 0.0),
                origin + Vec3::new(u, v, extent),
                cell_color,
            );
        }
    }
}

/// Markiert die Voxelzentren, deren Feldwert über dem Isolevel liegt.
pub fn draw_inside_samples_gizmos(
    mut gizmos: Gizmos,
    lattice: Res<Lattice>,
    sim_params: Res<SimulationParameters>,
) {
    let radius = lattice.config().cell_width * 0.08;
    for voxel in lattice.voxels() {
        if voxel.center.isovalue >= sim_params.isolevel {
            gizmos.sphere(voxel.position(), Quat::IDENTITY, radius, Color::YELLOW);
        }
    }
}

/// Metaballs als Drahtkugeln mit ihrem Radius, Geschwindigkeit als Linie.
pub fn draw_metaballs_gizmos(mut gizmos: Gizmos, metaballs: Res<MetaballSet>) {
    for ball in &metaballs.0 {
        gizmos.sphere(ball.position, Quat::IDENTITY, ball.radius(), Color::CYAN);
        gizmos.line(ball.position, ball.position + ball.velocity, Color::RED);
    }
}

fn draw_bounds(gizmos: &mut Gizmos, bounds: &Bounds3D, color: Color) {
    let transform = Transform::from_translation(bounds.center()).with_scale(bounds.size());
    gizmos.cuboid(transform, color);
}
