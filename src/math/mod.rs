pub mod algorithms;
pub mod error;
pub mod geometry;
pub mod types;
pub mod utils;

// Re-exports für einfache Verwendung
pub use error::{MathError, MathResult};
pub use types::*;

// Öffentliche API
pub mod prelude {
    pub use super::{
        algorithms::marching_cubes::{Lattice, MarchingCubes, SurfaceMesh, SurfaceStats},
        error::{MathError, MathResult},
        geometry::metaballs::{GridConfig, Metaball, MetaballField, MetaballsBuilder, ScalarField3D},
        types::*,
    };
}
