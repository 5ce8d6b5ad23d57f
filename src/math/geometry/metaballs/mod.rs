// src/math/geometry/metaballs/mod.rs

pub mod builder; // MetaballsBuilder
pub mod components; // GridConfig
pub mod field; // ScalarField3D, MetaballField
pub mod metaball; // Metaball + Bewegung

// Wichtige Re-Exporte für die einfache Nutzung des Metaball-Systems
pub use self::builder::MetaballsBuilder;
pub use self::components::GridConfig;
pub use self::field::{MetaballField, ScalarField3D};
pub use self::metaball::Metaball;
