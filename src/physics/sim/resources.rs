use crate::math::error::{MathError, MathResult};
use crate::math::geometry::metaballs::{GridConfig, Metaball, MetaballsBuilder};
use crate::math::types::Point3D;
use bevy::prelude::*;

/// Konfiguration der Simulation. Wird einmal vor dem Start validiert; Gitter und
/// Metaballs werden daraus erzeugt und danach nicht mehr umgebaut.
#[derive(Resource, Debug, Clone)]
pub struct SimulationParameters {
    // --- Isofläche ---
    pub isolevel: f32,

    // --- Metaballs ---
    pub num_metaballs: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    pub max_speed: f32,
    /// Fester Seed für reproduzierbare Startpositionen, `None` = zufällig.
    pub seed: Option<u64>,

    // --- Gitter ---
    pub grid_cell_width: f32,
    /// Kantenlänge des Bewegungsraums `[0, grid_width]³` der Metaballs.
    pub grid_width: f32,
    pub grid_res: usize,

    // --- Zeitsteuerung ---
    pub paused: bool,
    pub time_scale: f32,
    /// Abtastung und Polygonisierung auf dem `ComputeTaskPool` verteilen.
    pub parallel: bool,

    // --- Visualisierung & Debug ---
    /// Schaltet Debug-Hilfen überhaupt frei. Hat keinen Einfluss auf Feld oder Geometrie.
    pub visual_debug: bool,
    pub show_debug_grid: bool,
    pub show_surface_normals: bool,
    /// Länge der Normalenpfeile in Weltkoordinaten.
    pub normal_arrow_length: f32,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            // Isofläche
            isolevel: 1.0,

            // Metaballs
            num_metaballs: 6,
            min_radius: 0.4,
            max_radius: 0.9,
            max_speed: 1.0,
            seed: None,

            // Gitter: 30 Zellen à 0.2 = 6.0
            grid_cell_width: 0.2,
            grid_width: 6.0,
            grid_res: 30,

            // Zeit
            paused: false,
            time_scale: 1.0,
            parallel: true,

            // Vis/Debug
            visual_debug: cfg!(debug_assertions),
            show_debug_grid: false,
            show_surface_normals: false,
            normal_arrow_length: 0.15,
        }
    }
}

impl SimulationParameters {
    pub fn validate(&self) -> MathResult<()> {
        if !self.isolevel.is_finite() {
            return Err(MathError::config(format!(
                "isolevel must be finite, got {}",
                self.isolevel
            )));
        }
        if self.grid_res == 0 {
            return Err(MathError::config("grid_res must be positive"));
        }
        if !(self.grid_cell_width > 0.0) {
            return Err(MathError::config(format!(
                "grid_cell_width must be positive, got {}",
                self.grid_cell_width
            )));
        }
        if !(self.grid_width > 0.0) {
            return Err(MathError::config(format!(
                "grid_width must be positive, got {}",
                self.grid_width
            )));
        }
        if !(self.min_radius > 0.0) {
            return Err(MathError::config(format!(
                "min_radius must be positive, got {}",
                self.min_radius
            )));
        }
        if self.min_radius > self.max_radius {
            return Err(MathError::config(format!(
                "min_radius {} exceeds max_radius {}",
                self.min_radius, self.max_radius
            )));
        }
        if !(self.max_speed >= 0.0) {
            return Err(MathError::config(format!(
                "max_speed must not be negative, got {}",
                self.max_speed
            )));
        }
        if !(self.time_scale >= 0.0) {
            return Err(MathError::config(format!(
                "time_scale must not be negative, got {}",
                self.time_scale
            )));
        }
        self.grid_config().validate()
    }

    /// Gitter beginnt im Ursprung, passend zum Bewegungsraum der Metaballs.
    pub fn grid_config(&self) -> GridConfig {
        GridConfig::new(Point3D::ZERO, self.grid_cell_width, self.grid_res)
    }

    pub fn metaballs_builder(&self) -> MetaballsBuilder {
        MetaballsBuilder::new()
            .random_count(self.num_metaballs)
            .radius_range(self.min_radius, self.max_radius)
            .max_speed(self.max_speed)
            .domain_width(self.grid_width)
            .seed(self.seed)
    }

    pub fn debug_grid_visible(&self) -> bool {
        self.visual_debug && self.show_debug_grid
    }

    pub fn surface_normals_visible(&self) -> bool {
        self.visual_debug && self.show_surface_normals
    }
}

/// Die simulierten Metaballs. Von den Systemen pro Frame bewegt, vom Feld nur gelesen.
#[derive(Resource, Debug, Clone, Default)]
pub struct MetaballSet(pub Vec<Metaball>);

/// Handle des Mesh-Assets, das die Isofläche darstellt.
#[derive(Resource, Debug, Clone)]
pub struct SurfaceMeshHandle(pub Handle<Mesh>);

#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct ExecuteSingleStepRequest(pub bool);
