// src/math/algorithms/marching_cubes/polygonizer.rs

use super::lattice::{Sample, Voxel};
use super::tables::{EDGE_CORNERS, EDGE_COUNT, EDGE_TABLE, TRI_TABLE, TRI_TABLE_SENTINEL};
use crate::math::types::{Point3D, Vec3};
use crate::math::utils::comparison::{inverse_lerp, nearly_equal_eps};
use crate::math::utils::constants::INTERPOLATION_EPSILON;

/// Dreieck der extrahierten Isofläche, Reihenfolge wie in `TRI_TABLE`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub positions: [Point3D; 3],
    pub normals: [Vec3; 3],
}

/// Schnittpunkt der Isofläche mit einer Kante.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgePoint {
    pub position: Point3D,
    pub normal: Vec3,
}

impl From<&Sample> for EdgePoint {
    fn from(sample: &Sample) -> Self {
        Self {
            position: sample.position,
            normal: sample.isonormal,
        }
    }
}

/// 8-Bit-Würfelindex: Bit k ist gesetzt, wenn Ecke k unter dem Isolevel liegt.
pub fn cube_index(voxel: &Voxel, isolevel: f32) -> u8 {
    voxel
        .corners
        .iter()
        .enumerate()
        .fold(0u8, |index, (k, corner)| {
            if corner.isovalue < isolevel {
                index | (1 << k)
            } else {
                index
            }
        })
}

/// Lineare Interpolation des Schnittpunkts zwischen zwei Ecken.
///
/// Reihenfolge der Sonderfälle: Isolevel trifft A, trifft B, A und B (fast) gleich -> A.
pub fn interpolate_edge(a: &Sample, b: &Sample, isolevel: f32) -> EdgePoint {
    if nearly_equal_eps(isolevel, a.isovalue, INTERPOLATION_EPSILON) {
        return EdgePoint::from(a);
    }
    if nearly_equal_eps(isolevel, b.isovalue, INTERPOLATION_EPSILON) {
        return EdgePoint::from(b);
    }
    if nearly_equal_eps(a.isovalue, b.isovalue, INTERPOLATION_EPSILON) {
        return EdgePoint::from(a);
    }

    let t = inverse_lerp(a.isovalue, b.isovalue, isolevel);
    EdgePoint {
        position: a.position + t * (b.position - a.position),
        normal: a.isonormal + t * (b.isonormal - a.isonormal),
    }
}

/// Polygonisiert einen abgetasteten Voxel. Reine Funktion, 0 bis 5 Dreiecke.
pub fn polygonize(voxel: &Voxel, isolevel: f32) -> Vec<Triangle> {
    let mut triangles = Vec::new();
    polygonize_into(voxel, isolevel, &mut triangles);
    triangles
}

/// Wie `polygonize`, hängt aber an `out` an. Gibt die Anzahl neuer Dreiecke zurück.
pub fn polygonize_into(voxel: &Voxel, isolevel: f32, out: &mut Vec<Triangle>) -> usize {
    let cube_index = cube_index(voxel, isolevel);
    let edge_mask = EDGE_TABLE[cube_index as usize];
    if edge_mask == 0 {
        // Vollständig innerhalb oder außerhalb
        return 0;
    }

    let mut edge_points = [EdgePoint::default(); EDGE_COUNT];
    for (edge, &(a, b)) in EDGE_CORNERS.iter().enumerate() {
        if edge_mask & (1 << edge) != 0 {
            edge_points[edge] = interpolate_edge(&voxel.corners[a], &voxel.corners[b], isolevel);
        }
    }

    let before = out.len();
    for tri in TRI_TABLE[cube_index as usize].chunks_exact(3) {
        if tri[0] == TRI_TABLE_SENTINEL {
            break;
        }
        let [p0, p1, p2] = [tri[0], tri[1], tri[2]].map(|e| edge_points[e as usize]);
        out.push(Triangle {
            positions: [p0.position, p1.position, p2.position],
            normals: [p0.normal, p1.normal, p2.normal],
        });
    }
    out.len() - before
}
