// src/math/algorithms/marching_cubes/lattice.rs

use super::tables::{CORNER_COUNT, CORNER_OFFSETS};
use crate::math::error::MathResult;
use crate::math::geometry::metaballs::GridConfig;
use crate::math::types::{Bounds3D, Point3D, UVec3, Vec3};
use bevy::prelude::*;

/// Ein Abtastpunkt des Skalarfelds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sample {
    pub position: Point3D,
    pub isovalue: f32,
    pub isonormal: Vec3,
}

impl Sample {
    pub fn at(position: Point3D) -> Self {
        Self {
            position,
            ..default()
        }
    }
}

/// Eine kubische Zelle mit Zentrum und 8 Ecken (Bourke-Reihenfolge).
///
/// Die Positionen der Samples werden beim Erzeugen festgelegt; pro Frame ändern sich nur
/// `isovalue` und `isonormal`.
#[derive(Debug, Clone, PartialEq)]
pub struct Voxel {
    pub center: Sample,
    pub corners: [Sample; CORNER_COUNT],
}

impl Voxel {
    pub fn new(center: Point3D, cell_width: f32) -> Self {
        let half = cell_width * 0.5;
        Self {
            center: Sample::at(center),
            corners: CORNER_OFFSETS.map(|offset| Sample::at(center + Vec3::from(offset) * half)),
        }
    }

    pub fn position(&self) -> Point3D {
        self.center.position
    }
}

/// Reguläres Voxelgitter mit N³ Zellen.
///
/// Linearer Index: `i = x + y·N + z·N²`. Die Reihenfolge der Voxel wird nach dem Aufbau
/// nie verändert.
#[derive(Resource, Debug, Clone)]
pub struct Lattice {
    config: GridConfig,
    res_sq: usize,
    res_cubed: usize,
    voxels: Vec<Voxel>,
}

impl Lattice {
    pub fn new(config: GridConfig) -> MathResult<Self> {
        config.validate()?;

        let n = config.resolution;
        let res_sq = n * n;
        let res_cubed = res_sq * n;

        let mut lattice = Self {
            config,
            res_sq,
            res_cubed,
            voxels: Vec::with_capacity(res_cubed),
        };
        for i in 0..res_cubed {
            let coord = lattice.index_to_coord3(i);
            let center = lattice.coord_to_world_position(coord.x, coord.y, coord.z);
            lattice.voxels.push(Voxel::new(center, lattice.config.cell_width));
        }
        Ok(lattice)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn resolution(&self) -> usize {
        self.config.resolution
    }

    pub fn len(&self) -> usize {
        self.res_cubed
    }

    pub fn is_empty(&self) -> bool {
        self.res_cubed == 0
    }

    /// Linearer Index -> (x, y, z).
    #[inline]
    pub fn index_to_coord3(&self, index: usize) -> UVec3 {
        let n = self.config.resolution;
        UVec3::new(
            (index % n) as u32,
            ((index / n) % n) as u32,
            (index / self.res_sq) as u32,
        )
    }

    /// (x, y, z) -> linearer Index.
    #[inline]
    pub fn coord3_to_index(&self, x: u32, y: u32, z: u32) -> usize {
        x as usize + y as usize * self.config.resolution + z as usize * self.res_sq
    }

    /// Weltposition des Voxelzentrums.
    pub fn coord_to_world_position(&self, x: u32, y: u32, z: u32) -> Point3D {
        let half = self.config.cell_width * 0.5;
        self.config.origin + Vec3::new(x as f32, y as f32, z as f32) * self.config.cell_width
            + Vec3::splat(half)
    }

    pub fn voxel(&self, index: usize) -> Option<&Voxel> {
        self.voxels.get(index)
    }

    pub fn voxel_at(&self, x: u32, y: u32, z: u32) -> Option<&Voxel> {
        let n = self.config.resolution as u32;
        if x >= n || y >= n || z >= n {
            return None;
        }
        self.voxel(self.coord3_to_index(x, y, z))
    }

    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    pub fn voxels_mut(&mut self) -> &mut [Voxel] {
        &mut self.voxels
    }

    /// Weltraum-Ausdehnung des gesamten Gitters.
    pub fn bounds(&self) -> Bounds3D {
        let extent = self.config.cell_width * self.config.resolution as f32;
        Bounds3D::from_points(self.config.origin, self.config.origin + Vec3::splat(extent))
    }
}
