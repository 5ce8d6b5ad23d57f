pub mod resources; // SimulationParameters, MetaballSet, Anfragen
pub mod state; // SimulationState
pub mod systems; // Bewegung, Extraktion, Mesh-Upload
