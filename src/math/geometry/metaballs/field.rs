// src/math/geometry/metaballs/field.rs

use super::metaball::Metaball;
use crate::math::types::{Point3D, Vec3};
use crate::math::utils::constants::{FIELD_SATURATION, GRADIENT_EPSILON};

/// Trait für ein dreidimensionales Skalarfeld.
/// Ermöglicht es Marching Cubes, auf verschiedenen Feldimplementierungen zu operieren.
pub trait ScalarField3D {
    /// Feldwert an einem beliebigen Punkt.
    fn evaluate(&self, point: Point3D) -> f32;

    /// Geschätzte Oberflächennormale: negierter, normalisierter Gradient des Gesamtfelds
    /// (zentrale Differenzen, jede Achse separat).
    ///
    /// Liefert `Vec3::ZERO`, wenn der Gradient verschwindet.
    fn estimate_normal(&self, point: Point3D) -> Vec3 {
        let e = GRADIENT_EPSILON;
        let gradient = Vec3::new(
            self.evaluate(point + Vec3::X * e) - self.evaluate(point - Vec3::X * e),
            self.evaluate(point + Vec3::Y * e) - self.evaluate(point - Vec3::Y * e),
            self.evaluate(point + Vec3::Z * e) - self.evaluate(point - Vec3::Z * e),
        );
        // Das Feld fällt nach außen ab
        (-gradient).normalize_or_zero()
    }
}

/// Summe der Beiträge aller Metaballs eines Frames.
#[derive(Debug, Clone, Copy)]
pub struct MetaballField<'a> {
    metaballs: &'a [Metaball],
}

impl<'a> MetaballField<'a> {
    pub fn new(metaballs: &'a [Metaball]) -> Self {
        Self { metaballs }
    }
}

impl ScalarField3D for MetaballField<'_> {
    fn evaluate(&self, point: Point3D) -> f32 {
        self.metaballs
            .iter()
            .map(|ball| ball.influence_at(point))
            .sum::<f32>()
            .min(FIELD_SATURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_metaball_isosurface_at_radius() {
        let balls = [Metaball::stationary(Vec3::splat(1.0), 1.0)];
        let field = MetaballField::new(&balls);

        assert_relative_eq!(field.evaluate(Vec3::new(2.0, 1.0, 1.0)), 1.0, epsilon = 1e-6);
        assert_relative_eq!(field.evaluate(Vec3::new(1.0, 1.0, 0.0)), 1.0, epsilon = 1e-6);
        assert!(field.evaluate(Vec3::new(1.5, 1.0, 1.0)) > 1.0);
        assert!(field.evaluate(Vec3::new(2.5, 1.0, 1.0)) < 1.0);
    }

    #[test]
    fn test_contributions_are_summed() {
        let balls = [
            Metaball::stationary(Vec3::ZERO, 1.0),
            Metaball::stationary(Vec3::new(4.0, 0.0, 0.0), 2.0),
        ];
        let field = MetaballField::new(&balls);
        // 1/4 + 4/4
        assert_relative_eq!(field.evaluate(Vec3::new(2.0, 0.0, 0.0)), 1.25, epsilon = 1e-6);
    }

    #[test]
    fn test_empty_field_is_zero() {
        let field = MetaballField::new(&[]);
        assert_eq!(field.evaluate(Vec3::ONE), 0.0);
        assert_eq!(field.estimate_normal(Vec3::ONE), Vec3::ZERO);
    }

    #[test]
    fn test_field_at_center_is_finite() {
        let balls = [
            Metaball::stationary(Vec3::ZERO, 1.0),
            Metaball::stationary(Vec3::ZERO, 1.0),
        ];
        let field = MetaballField::new(&balls);
        let v = field.evaluate(Vec3::ZERO);
        assert!(v.is_finite());
        assert_eq!(v, FIELD_SATURATION);
    }

    #[test]
    fn test_normal_points_away_from_center() {
        let center = Vec3::new(2.0, 2.0, 2.0);
        let balls = [Metaball::stationary(center, 1.0)];
        let field = MetaballField::new(&balls);

        for dir in [Vec3::X, Vec3::NEG_Y, Vec3::Z, Vec3::new(1.0, 1.0, -1.0).normalize()] {
            let n = field.estimate_normal(center + dir);
            assert_relative_eq!(n.length(), 1.0, epsilon = 1e-4);
            assert!(n.dot(dir) > 0.99, "normal {:?} for direction {:?}", n, dir);
        }
    }

    #[test]
    fn test_normal_uses_each_axis() {
        // Punkt nur in y-Richtung versetzt: die Normale darf keine x/z-Anteile haben
        let balls = [Metaball::stationary(Vec3::ZERO, 1.0)];
        let field = MetaballField::new(&balls);
        let n = field.estimate_normal(Vec3::new(0.0, 1.5, 0.0));
        assert!(n.x.abs() < 1e-3);
        assert!(n.z.abs() < 1e-3);
        assert!(n.y > 0.999);
    }
}
