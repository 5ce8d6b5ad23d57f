use crate::math::algorithms::marching_cubes::SurfaceMesh;
use crate::physics::sim::resources::SimulationParameters;
use bevy::prelude::*;

/// Höchstens so viele Pfeile pro Frame, sonst wird jeder n-te Vertex übersprungen.
const MAX_ARROWS: usize = 4_000;

/// Ein Normalenpfeil auf der Isofläche.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalArrow {
    pub origin: Vec3,
    /// Normalisierte Richtung.
    pub direction: Vec3,
    pub length: f32,
}

impl NormalArrow {
    pub fn tip(&self) -> Vec3 {
        self.origin + self.direction * self.length
    }
}

/// Pfeile für die Vertices der Isofläche, ausgedünnt auf `MAX_ARROWS`.
///
/// Interpolierte Normalen sind nicht normalisiert; Vertices mit verschwindender Normale
/// bekommen keinen Pfeil.
pub fn surface_normal_arrows(surface: &SurfaceMesh, length: f32) -> Vec<NormalArrow> {
    let stride = surface.positions.len().div_ceil(MAX_ARROWS).max(1);
    surface
        .positions
        .iter()
        .zip(surface.normals.iter())
        .step_by(stride)
        .filter_map(|(p, n)| {
            let direction = Vec3::from(*n).try_normalize()?;
            Some(NormalArrow {
                origin: Vec3::from(*p),
                direction,
                length,
            })
        })
        .collect()
}

pub fn surface_normals_visible(sim_params: Res<SimulationParameters>) -> bool {
    sim_params.surface_normals_visible()
}

/// Zeichnet die Normalen der aktuellen Isofläche als Gizmo-Pfeile.
pub fn draw_surface_normals_system(
    surface: Res<SurfaceMesh>,
    sim_params: Res<SimulationParameters>,
    mut gizmos: Gizmos,
) {
    for arrow in surface_normal_arrows(&surface, sim_params.normal_arrow_length) {
        gizmos.arrow(arrow.origin, arrow.tip(), Color::LIME_GREEN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_are_thinned_and_normalized() {
        let count = MAX_ARROWS * 3;
        let surface = SurfaceMesh {
            positions: vec![[1.0, 2.0, 3.0]; count],
            normals: vec![[0.0, 2.0, 0.0]; count],
            indices: (0..count as u32).collect(),
            ..Default::default()
        };
        let arrows = surface_normal_arrows(&surface, 0.5);
        assert_eq!(arrows.len(), MAX_ARROWS);
        assert_eq!(arrows[0].direction, Vec3::Y);
        assert_eq!(arrows[0].tip(), Vec3::new(1.0, 2.5, 3.0));
    }

    #[test]
    fn test_zero_normals_are_skipped() {
        let surface = SurfaceMesh {
            positions: vec![[0.0; 3], [1.0; 3]],
            normals: vec![[0.0; 3], [1.0, 0.0, 0.0]],
            indices: vec![0, 1],
            ..Default::default()
        };
        let arrows = surface_normal_arrows(&surface, 1.0);
        assert_eq!(arrows.len(), 1);
        assert_eq!(arrows[0].origin, Vec3::ONE);
    }
}
