// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    pub const EPSILON: f32 = 1e-6;
    pub const EPSILON_SQUARED: f32 = EPSILON * EPSILON; // Für Vergleiche mit Längen

    /// Obergrenze für Feldwerte. Ersetzt ∞ direkt an einem Metaball-Zentrum.
    pub const FIELD_SATURATION: f32 = 1e6;

    /// Schrittweite der zentralen Differenzen für die Gradientenschätzung (Weltkoordinaten).
    pub const GRADIENT_EPSILON: f32 = 1e-3;

    /// Toleranz der Kanteninterpolation im Marching-Cubes-Polygonizer.
    pub const INTERPOLATION_EPSILON: f32 = 1e-5;
}

/// Vergleichsfunktionen mit Toleranz
pub mod comparison {
    use super::constants::EPSILON;

    /// Prüft ob zwei Floats (nahezu) gleich sind
    pub fn nearly_equal(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    /// Prüft ob zwei Floats mit custom Toleranz gleich sind
    pub fn nearly_equal_eps(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }

    /// Inverse lineare Interpolation
    pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
        if nearly_equal(a, b) {
            0.0
        } else {
            (value - a) / (b - a)
        }
    }
}
