// src/math/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Invalid bounds: min {min:?} > max {max:?}")]
    InvalidBounds { min: [f32; 3], max: [f32; 3] },
}

impl MathError {
    /// Kurzform für `InvalidConfiguration`.
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}

pub type MathResult<T> = Result<T, MathError>;
