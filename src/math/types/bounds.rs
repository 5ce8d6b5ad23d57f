// src/math/types/bounds.rs

use crate::math::{error::*, types::*};

/// 3D Bounding Box (Axis-Aligned Bounding Box)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3D {
    pub min: Point3D,
    pub max: Point3D,
}

impl Bounds3D {
    /// Erstellt eine neue Bounding Box
    pub fn new(min: Point3D, max: Point3D) -> MathResult<Self> {
        if min.x > max.x || min.y > max.y || min.z > max.z {
            return Err(MathError::InvalidBounds {
                min: min.to_array(),
                max: max.to_array(),
            });
        }

        Ok(Self { min, max })
    }

    /// Würfel mit Kantenlänge `width`, beginnend bei `origin`.
    pub fn cube(origin: Point3D, width: f32) -> MathResult<Self> {
        Self::new(origin, origin + Point3D::splat(width))
    }

    /// Erstellt eine Bounding Box aus zwei beliebigen Punkten
    pub fn from_points(p1: Point3D, p2: Point3D) -> Self {
        Self {
            min: p1.min(p2),
            max: p1.max(p2),
        }
    }

    pub fn center(&self) -> Point3D {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Point3D {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_bounds_rejected() {
        let result = Bounds3D::new(Vec3::ONE, Vec3::ZERO);
        assert!(matches!(result, Err(MathError::InvalidBounds { .. })));
    }

    #[test]
    fn test_cube_bounds() {
        let b = Bounds3D::cube(Vec3::new(1.0, 2.0, 3.0), 2.0).unwrap();
        assert_eq!(b.center(), Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(b.size(), Vec3::splat(2.0));
    }

    #[test]
    fn test_from_points_orders_corners() {
        let b = Bounds3D::cube(Vec3::ZERO, 1.0).unwrap();
        let p = Bounds3D::from_points(Vec3::ONE, Vec3::ZERO);
        assert_eq!(p, b);
    }
}
