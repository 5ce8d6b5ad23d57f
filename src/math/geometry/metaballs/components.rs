// src/math/geometry/metaballs/components.rs

use crate::math::error::{MathError, MathResult};
use crate::math::types::Point3D;

/// Gemeinsame Konfiguration für das Voxelgitter der Marching-Cubes-Extraktion.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Ursprung (minimale Ecke) des Gitters in Weltkoordinaten.
    pub origin: Point3D,
    /// Kantenlänge einer Zelle in Weltkoordinaten.
    pub cell_width: f32,
    /// Anzahl der Zellen pro Achse (N).
    pub resolution: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            origin: Point3D::ZERO,
            cell_width: 0.25,
            resolution: 24,
        }
    }
}

impl GridConfig {
    /// Erstellt eine neue Grid-Konfiguration.
    pub fn new(origin: Point3D, cell_width: f32, resolution: usize) -> Self {
        Self {
            origin,
            cell_width,
            resolution,
        }
    }

    /// Gesamtbreite des Gitters pro Achse.
    pub fn width(&self) -> f32 {
        self.cell_width * self.resolution as f32
    }

    pub fn validate(&self) -> MathResult<()> {
        if self.resolution == 0 {
            return Err(MathError::config("grid resolution must be positive"));
        }
        if !(self.cell_width.is_finite() && self.cell_width > 0.0) {
            return Err(MathError::config(format!(
                "cell width must be positive and finite, got {}",
                self.cell_width
            )));
        }
        if !self.origin.is_finite() {
            return Err(MathError::config("grid origin must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GridConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.width(), 6.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = GridConfig::default();
        config.cell_width = -1.0;
        assert!(config.validate().is_err());

        let mut config = GridConfig::default();
        config.origin.y = f32::NAN;
        assert!(config.validate().is_err());

        let config = GridConfig::new(Point3D::ZERO, 1.0, 0);
        assert!(matches!(
            config.validate(),
            Err(MathError::InvalidConfiguration { .. })
        ));
    }
}
