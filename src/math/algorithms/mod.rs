// src/math/algorithms/mod.rs

// Deklaration der verschiedenen Algorithmus-Kategorien
pub mod marching_cubes;

// Re-Exporte für den direkten Zugriff auf die Algorithmus-Module
pub use self::marching_cubes::{
    Lattice, MarchingCubes, Sample, SurfaceMesh, SurfaceStats, Triangle, Voxel,
};
