// src/math/algorithms/marching_cubes/sampler.rs

use super::lattice::{Lattice, Voxel};
use crate::math::geometry::metaballs::ScalarField3D;
use bevy::tasks::TaskPool;

/// Wertet das Feld am Zentrum und an allen 8 Ecken aus; Normalen nur an den Ecken.
pub fn sample_voxel<F: ScalarField3D + ?Sized>(voxel: &mut Voxel, field: &F) {
    voxel.center.isovalue = field.evaluate(voxel.center.position);
    for corner in voxel.corners.iter_mut() {
        corner.isovalue = field.evaluate(corner.position);
        corner.isonormal = field.estimate_normal(corner.position);
    }
}

/// Sequentielle Abtastung aller Voxel.
pub fn sample_lattice<F: ScalarField3D + ?Sized>(lattice: &mut Lattice, field: &F) {
    for voxel in lattice.voxels_mut() {
        sample_voxel(voxel, field);
    }
}

/// Parallele Abtastung: disjunkte Voxel-Blöcke pro Task, kein Locking.
/// Kehrt erst zurück, wenn alle Blöcke fertig sind.
pub fn sample_lattice_parallel<F: ScalarField3D + Sync + ?Sized>(
    lattice: &mut Lattice,
    field: &F,
    pool: &TaskPool,
) {
    let chunk_size = chunk_size_for(lattice.len(), pool.thread_num());
    let voxels = lattice.voxels_mut();
    pool.scope(|scope| {
        for chunk in voxels.chunks_mut(chunk_size) {
            scope.spawn(async move {
                for voxel in chunk.iter_mut() {
                    sample_voxel(voxel, field);
                }
            });
        }
    });
}

/// Blockgröße für die Aufteilung auf `threads` Worker (etwas feiner für Lastausgleich).
pub(crate) fn chunk_size_for(len: usize, threads: usize) -> usize {
    let tasks = threads.max(1) * 4;
    len.div_ceil(tasks).max(1)
}
