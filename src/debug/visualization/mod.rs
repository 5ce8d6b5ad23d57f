pub mod lattice_grid; // Gitter, Abtastpunkte, Metaballs
pub mod normal_vector; // Normalen der Isofläche
