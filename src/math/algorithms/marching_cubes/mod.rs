// src/math/algorithms/marching_cubes/mod.rs

pub mod lattice; // Lattice, Voxel, Sample
pub mod mesh; // SurfaceMesh (Zusammenfügen der Dreiecke)
pub mod polygonizer; // Würfelindex, Kanteninterpolation, Dreiecke
pub mod sampler; // Feldauswertung pro Voxel
pub mod tables; // EDGE_TABLE, TRI_TABLE

pub use self::lattice::{Lattice, Sample, Voxel};
pub use self::mesh::{SurfaceMesh, SurfaceStats};
pub use self::polygonizer::{EdgePoint, Triangle, cube_index, interpolate_edge, polygonize};
pub use self::sampler::{sample_lattice, sample_lattice_parallel, sample_voxel};

use crate::math::geometry::metaballs::ScalarField3D;
use bevy::tasks::TaskPool;

/// Ein kompletter Extraktionsdurchlauf: abtasten, polygonisieren, zusammenfügen.
pub struct MarchingCubes;

impl MarchingCubes {
    /// Sequentiell.
    pub fn extract<F: ScalarField3D + ?Sized>(
        lattice: &mut Lattice,
        field: &F,
        isolevel: f32,
    ) -> SurfaceMesh {
        sample_lattice(lattice, field);
        SurfaceMesh::assemble(lattice, isolevel)
    }

    /// Parallel auf `pool`. Das Ergebnis ist erst nach beiden Phasen vollständig.
    pub fn extract_parallel<F: ScalarField3D + Sync + ?Sized>(
        lattice: &mut Lattice,
        field: &F,
        isolevel: f32,
        pool: &TaskPool,
    ) -> SurfaceMesh {
        sample_lattice_parallel(lattice, field, pool);
        SurfaceMesh::assemble_parallel(lattice, isolevel, pool)
    }
}
