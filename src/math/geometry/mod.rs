// src/math/geometry/mod.rs

pub mod metaballs;

// Metaball-Exporte
pub use self::metaballs::{GridConfig, Metaball, MetaballField, MetaballsBuilder, ScalarField3D};
