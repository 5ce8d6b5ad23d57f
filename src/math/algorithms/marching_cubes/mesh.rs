// src/math/algorithms/marching_cubes/mesh.rs

use super::lattice::{Lattice, Voxel};
use super::polygonizer::{Triangle, polygonize_into};
use super::sampler::chunk_size_for;
use bevy::prelude::*;
use bevy::render::{
    mesh::Indices, render_asset::RenderAssetUsages, render_resource::PrimitiveTopology,
};
use bevy::tasks::TaskPool;

/// Kennzahlen eines Frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceStats {
    pub voxels: usize,
    /// Voxel mit mindestens einem Dreieck.
    pub active_voxels: usize,
    pub triangles: usize,
}

/// Vertex-, Normalen- und Indexpuffer der Isofläche eines Frames.
///
/// Gemeinsame Kantenpunkte benachbarter Voxel werden nicht zusammengeführt: jedes Dreieck
/// bringt drei eigene Vertices mit. Das Netz ist daher nicht wasserdicht im Sinne geteilter
/// Vertices, auch wenn die Positionen übereinstimmen.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct SurfaceMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub stats: SurfaceStats,
}

impl SurfaceMesh {
    /// Polygonisiert alle Voxel in Gitterreihenfolge (sequentiell).
    pub fn assemble(lattice: &Lattice, isolevel: f32) -> Self {
        let mut mesh = Self::default();
        let mut triangles = Vec::new();
        for voxel in lattice.voxels() {
            if polygonize_into(voxel, isolevel, &mut triangles) > 0 {
                mesh.stats.active_voxels += 1;
            }
        }
        mesh.stats.voxels = lattice.len();
        mesh.extend_from_triangles(&triangles);
        mesh
    }

    /// Wie `assemble`, aber blockweise auf dem `TaskPool`. Ergebnis identisch zur
    /// sequentiellen Variante, da die Blöcke in Gitterreihenfolge zusammengefügt werden.
    pub fn assemble_parallel(lattice: &Lattice, isolevel: f32, pool: &TaskPool) -> Self {
        let chunk_size = chunk_size_for(lattice.len(), pool.thread_num());
        let voxels = lattice.voxels();
        let mut chunks = pool.scope(|scope| {
            for (chunk_index, chunk) in voxels.chunks(chunk_size).enumerate() {
                scope.spawn(async move { (chunk_index, polygonize_chunk(chunk, isolevel)) });
            }
        });
        chunks.sort_unstable_by_key(|(chunk_index, _)| *chunk_index);

        let mut mesh = Self::default();
        mesh.stats.voxels = lattice.len();
        for (_, (triangles, active_voxels)) in chunks {
            mesh.stats.active_voxels += active_voxels;
            mesh.extend_from_triangles(&triangles);
        }
        mesh
    }

    fn extend_from_triangles(&mut self, triangles: &[Triangle]) {
        self.positions.reserve(triangles.len() * 3);
        self.normals.reserve(triangles.len() * 3);
        self.indices.reserve(triangles.len() * 3);
        for triangle in triangles {
            for k in 0..3 {
                self.indices.push(self.positions.len() as u32);
                self.positions.push(triangle.positions[k].to_array());
                self.normals.push(triangle.normals[k].to_array());
            }
        }
        self.stats.triangles += triangles.len();
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Dreiecksliste für den Renderer. Ersetzt pro Frame das gesamte Mesh-Asset.
    pub fn to_bevy_mesh(&self) -> Mesh {
        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, self.positions.clone())
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals.clone())
        .with_inserted_indices(Indices::U32(self.indices.clone()))
    }
}

fn polygonize_chunk(chunk: &[Voxel], isolevel: f32) -> (Vec<Triangle>, usize) {
    let mut triangles = Vec::new();
    let mut active_voxels = 0;
    for voxel in chunk {
        if polygonize_into(voxel, isolevel, &mut triangles) > 0 {
            active_voxels += 1;
        }
    }
    (triangles, active_voxels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::algorithms::marching_cubes::sampler::sample_lattice;
    use crate::math::geometry::metaballs::{GridConfig, Metaball, MetaballField};
    use bevy::render::mesh::VertexAttributeValues;

    fn sampled_lattice() -> Lattice {
        let mut lattice = Lattice::new(GridConfig::new(Vec3::ZERO, 0.25, 12)).unwrap();
        let balls = [
            Metaball::stationary(Vec3::splat(1.4), 0.7),
            Metaball::stationary(Vec3::new(1.9, 1.6, 1.3), 0.5),
        ];
        sample_lattice(&mut lattice, &MetaballField::new(&balls));
        lattice
    }

    #[test]
    fn test_buffers_are_parallel() {
        let mesh = SurfaceMesh::assemble(&sampled_lattice(), 1.0);
        assert!(!mesh.is_empty());
        assert_eq!(mesh.positions.len(), mesh.normals.len());
        assert_eq!(mesh.positions.len(), mesh.indices.len());
        assert_eq!(mesh.triangle_count(), mesh.stats.triangles);
        assert_eq!(mesh.stats.voxels, 12 * 12 * 12);
        assert!(mesh.stats.active_voxels > 0 && mesh.stats.active_voxels < mesh.stats.voxels);
        // Unindizierte Dreiecksliste: Indizes laufen fortlaufend
        assert!(mesh.indices.iter().enumerate().all(|(i, &idx)| idx as usize == i));
    }

    #[test]
    fn test_lattice_order_is_preserved() {
        let lattice = sampled_lattice();
        let mesh = SurfaceMesh::assemble(&lattice, 1.0);

        let mut expected = Vec::new();
        for voxel in lattice.voxels() {
            polygonize_into(voxel, 1.0, &mut expected);
        }
        let first = expected[0].positions[0].to_array();
        assert_eq!(mesh.positions[0], first);
        let last = expected.last().unwrap().positions[2].to_array();
        assert_eq!(*mesh.positions.last().unwrap(), last);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let lattice = sampled_lattice();
        let pool = TaskPool::new();
        let sequential = SurfaceMesh::assemble(&lattice, 1.0);
        let parallel = SurfaceMesh::assemble_parallel(&lattice, 1.0, &pool);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_empty_field_yields_empty_mesh() {
        let mut lattice = Lattice::new(GridConfig::new(Vec3::ZERO, 1.0, 4)).unwrap();
        sample_lattice(&mut lattice, &MetaballField::new(&[]));
        let mesh = SurfaceMesh::assemble(&lattice, 1.0);
        assert!(mesh.is_empty());
        assert_eq!(mesh.stats.active_voxels, 0);
    }

    #[test]
    fn test_bevy_mesh_attributes() {
        let surface = SurfaceMesh::assemble(&sampled_lattice(), 1.0);
        let mesh = surface.to_bevy_mesh();
        assert_eq!(mesh.count_vertices(), surface.positions.len());
        match mesh.attribute(Mesh::ATTRIBUTE_NORMAL) {
            Some(VertexAttributeValues::Float32x3(normals)) => {
                assert_eq!(normals.len(), surface.normals.len())
            }
            other => panic!("unexpected normal attribute: {:?}", other),
        }
        assert_eq!(mesh.indices().map(|i| i.len()), Some(surface.indices.len()));
    }
}
