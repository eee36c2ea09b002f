use thiserror::Error;
use uuid::Uuid;

/// Errors raised by the canvas core.
///
/// None of these are fatal to a session: callers log them and carry on with
/// the next event or frame.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("unknown flower species: {0:?}")]
    UnknownSpecies(String),

    #[error("unknown ribbon style: {0:?}")]
    UnknownRibbonStyle(String),

    #[error("flower {0} is not in the scene")]
    FlowerNotFound(Uuid),

    #[error("flower scale must be a positive finite number, got {0}")]
    InvalidScale(f32),

    #[error("drawing surface unavailable ({width}x{height})")]
    SurfaceUnavailable { width: u32, height: u32 },

    #[error("no usable font: {0}")]
    FontUnavailable(String),

    #[error("image encoding failed: {0}")]
    Encode(String),
}
