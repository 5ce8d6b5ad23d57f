// src/math/geometry/metaballs/builder.rs

use crate::math::error::{MathError, MathResult};
use crate::math::geometry::metaballs::metaball::Metaball;
use crate::math::types::{Point3D, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Builder zum Erzeugen einer (teilweise zufälligen) Menge von `Metaball`s.
///
/// Zufällige Metaballs bekommen einen Radius in `[min_radius, max_radius]`, eine Position
/// innerhalb von `[0, domain_width]³` und Geschwindigkeitskomponenten in
/// `[-max_speed, max_speed]`.
#[derive(Debug, Clone)]
pub struct MetaballsBuilder {
    random_count: usize,
    min_radius: f32,
    max_radius: f32,
    max_speed: f32,
    domain_width: f32,
    seed: Option<u64>,
}

impl Default for MetaballsBuilder {
    fn default() -> Self {
        Self {
            random_count: 0,
            min_radius: 0.5,
            max_radius: 1.0,
            max_speed: 1.0,
            domain_width: 1.0,
            seed: None,
        }
    }
}

impl MetaballsBuilder {
    /// Erstellt einen neuen `MetaballsBuilder` mit Standardkonfiguration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Anzahl der zufällig zu erzeugenden Metaballs.
    pub fn random_count(mut self, count: usize) -> Self {
        self.random_count = count;
        self
    }

    pub fn radius_range(mut self, min_radius: f32, max_radius: f32) -> Self {
        self.min_radius = min_radius;
        self.max_radius = max_radius;
        self
    }

    pub fn max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    /// Kantenlänge des würfelförmigen Bewegungsraums `[0, width]³`.
    pub fn domain_width(mut self, width: f32) -> Self {
        self.domain_width = width;
        self
    }

    /// Fester Seed für reproduzierbare Erzeugung.
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    fn validate(&self) -> MathResult<()> {
        if !(self.min_radius > 0.0) {
            return Err(MathError::config(format!(
                "min radius must be positive, got {}",
                self.min_radius
            )));
        }
        if self.min_radius > self.max_radius {
            return Err(MathError::config(format!(
                "min radius {} exceeds max radius {}",
                self.min_radius, self.max_radius
            )));
        }
        if !(self.max_speed >= 0.0) {
            return Err(MathError::config(format!(
                "max speed must not be negative, got {}",
                self.max_speed
            )));
        }
        if !(self.domain_width > 0.0) {
            return Err(MathError::config(format!(
                "domain width must be positive, got {}",
                self.domain_width
            )));
        }
        Ok(())
    }

    /// Erzeugt die Metaballs. Fehler nur bei ungültiger Konfiguration.
    pub fn build(self) -> MathResult<Vec<Metaball>> {
        self.validate()?;

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => {
                let mut thread_rng = rand::rng();
                StdRng::from_rng(&mut thread_rng)
            }
        };

        Ok((0..self.random_count)
            .map(|_| self.random_metaball(&mut rng))
            .collect())
    }

    fn random_metaball(&self, rng: &mut impl Rng) -> Metaball {
        let radius = if self.min_radius < self.max_radius {
            rng.random_range(self.min_radius..=self.max_radius)
        } else {
            self.min_radius
        };

        // Möglichst so platzieren, dass der Metaball vollständig im Raum liegt
        let (low, high) = if self.domain_width > 2.0 * radius {
            (radius, self.domain_width - radius)
        } else {
            (0.0, self.domain_width)
        };
        let position = Point3D::new(
            rng.random_range(low..=high),
            rng.random_range(low..=high),
            rng.random_range(low..=high),
        );

        let velocity = if self.max_speed > 0.0 {
            Vec3::new(
                rng.random_range(-self.max_speed..=self.max_speed),
                rng.random_range(-self.max_speed..=self.max_speed),
                rng.random_range(-self.max_speed..=self.max_speed),
            )
        } else {
            Vec3::ZERO
        };

        Metaball::new(position, velocity, radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> MetaballsBuilder {
        MetaballsBuilder::new()
            .random_count(32)
            .radius_range(0.5, 1.5)
            .max_speed(2.0)
            .domain_width(10.0)
            .seed(Some(7))
    }

    #[test]
    fn test_random_metaballs_respect_ranges() {
        let balls = builder().build().unwrap();
        assert_eq!(balls.len(), 32);
        for ball in &balls {
            assert!((0.5..=1.5).contains(&ball.radius()));
            for axis in 0..3 {
                assert!(ball.position[axis] >= ball.radius() - 1e-5);
                assert!(ball.position[axis] <= 10.0 - ball.radius() + 1e-5);
                assert!(ball.velocity[axis].abs() <= 2.0);
            }
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        assert_eq!(builder().build().unwrap(), builder().build().unwrap());
    }

    #[test]
    fn test_zero_count_yields_empty_set() {
        assert!(builder().random_count(0).build().unwrap().is_empty());
    }

    #[test]
    fn test_equal_radius_bounds_and_zero_speed() {
        let balls = builder().radius_range(1.0, 1.0).max_speed(0.0).build().unwrap();
        assert!(balls.iter().all(|b| b.radius() == 1.0 && b.velocity == Vec3::ZERO));
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        assert!(builder().radius_range(2.0, 1.0).build().is_err());
        assert!(builder().radius_range(0.0, 1.0).build().is_err());
        assert!(builder().max_speed(-1.0).build().is_err());
        assert!(builder().domain_width(0.0).build().is_err());
    }
}
