// src/math/geometry/metaballs/metaball.rs

use crate::math::types::{Point3D, Vec3};
use crate::math::utils::constants::{EPSILON_SQUARED, FIELD_SATURATION};

/// Punktquelle mit inversem quadratischem Abfall: `radius² / distanz²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metaball {
    pub position: Point3D,
    pub velocity: Vec3,
    radius: f32,
    radius_sq: f32,
}

impl Metaball {
    pub fn new(position: Point3D, velocity: Vec3, radius: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
            radius_sq: radius * radius,
        }
    }

    /// Ruhender Metaball.
    pub fn stationary(position: Point3D, radius: f32) -> Self {
        Self::new(position, Vec3::ZERO, radius)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Feldbeitrag an `point`. Direkt am Zentrum wird auf `FIELD_SATURATION` begrenzt.
    #[inline]
    pub fn influence_at(&self, point: Point3D) -> f32 {
        let distance_sq = self.position.distance_squared(point);
        if distance_sq < EPSILON_SQUARED {
            return FIELD_SATURATION;
        }
        (self.radius_sq / distance_sq).min(FIELD_SATURATION)
    }

    /// Bewegt den Metaball um `velocity * dt` und reflektiert an den Grenzen von `[0, grid_width]`.
    ///
    /// Elastisch, ohne Korrektur des Kollisionszeitpunkts: die Position wird auf die Grenze
    /// geklemmt und die betroffene Geschwindigkeitskomponente negiert.
    pub fn advance(&mut self, dt: f32, grid_width: f32) {
        self.position += self.velocity * dt;

        for axis in 0..3 {
            if self.position[axis] < 0.0 {
                self.position[axis] = 0.0;
                self.velocity[axis] = -self.velocity[axis];
            } else if self.position[axis] > grid_width {
                self.position[axis] = grid_width;
                self.velocity[axis] = -self.velocity[axis];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_influence_is_one_at_radius() {
        let ball = Metaball::stationary(Vec3::new(1.0, 2.0, 3.0), 0.5);
        assert_relative_eq!(ball.influence_at(Vec3::new(1.5, 2.0, 3.0)), 1.0, epsilon = 1e-6);
        assert!(ball.influence_at(Vec3::new(1.2, 2.0, 3.0)) > 1.0);
        assert!(ball.influence_at(Vec3::new(2.0, 2.0, 3.0)) < 1.0);
    }

    #[test]
    fn test_influence_saturates_at_center() {
        let ball = Metaball::stationary(Vec3::ONE, 2.0);
        let v = ball.influence_at(Vec3::ONE);
        assert!(v.is_finite());
        assert_eq!(v, FIELD_SATURATION);
    }

    #[test]
    fn test_advance_reflects_at_right_boundary() {
        let mut ball = Metaball::new(Vec3::new(9.9, 5.0, 5.0), Vec3::new(1.0, 0.5, -0.25), 1.0);
        ball.advance(1.0, 10.0);
        assert_eq!(ball.position.x, 10.0);
        assert_eq!(ball.velocity.x, -1.0);
        // Andere Achsen unverändert
        assert_relative_eq!(ball.position.y, 5.5);
        assert_relative_eq!(ball.position.z, 4.75);
        assert_eq!(ball.velocity.y, 0.5);
        assert_eq!(ball.velocity.z, -0.25);
    }

    #[test]
    fn test_advance_reflects_at_left_boundary() {
        let mut ball = Metaball::new(Vec3::new(0.1, 1.0, 1.0), Vec3::new(0.0, 0.0, -2.0), 1.0);
        ball.advance(1.0, 10.0);
        assert_eq!(ball.position.z, 0.0);
        assert_eq!(ball.velocity.z, 2.0);
        assert_eq!(ball.position.x, 0.1);
    }

    #[test]
    fn test_advance_inside_domain_keeps_velocity() {
        let mut ball = Metaball::new(Vec3::splat(5.0), Vec3::new(1.0, -1.0, 0.5), 1.0);
        ball.advance(0.5, 10.0);
        assert_eq!(ball.position, Vec3::new(5.5, 4.5, 5.25));
        assert_eq!(ball.velocity, Vec3::new(1.0, -1.0, 0.5));
    }
}
