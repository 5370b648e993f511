//! Error types for the safe API

use horde3d_sys::LoadError;

/// Errors raised by [`crate::Engine`]
#[derive(Debug, thiserror::Error)]
pub enum HordeError {
    #[error(transparent)]
    Load(#[from] LoadError),

    /// `h3dInit` returned false; details are in the message queue
    #[error("engine initialization failed")]
    InitFailed,

    /// Operation requires an initialized engine
    #[error("engine is not initialized")]
    NotInitialized,

    #[error("string contains an interior NUL byte: {0:?}")]
    InvalidString(String),

    /// The engine reported failure for a call (invalid handle or parameter)
    #[error("{call} was rejected by the engine")]
    Rejected { call: &'static str },

    #[error("utility library is not loaded")]
    UtilsUnavailable,

    /// Length does not fit the engine's 32 bit size parameters
    #[error("buffer of {len} elements exceeds the engine size limit")]
    BufferTooLarge { len: usize },

    #[error("overlay vertices must form whole quads of (x, y, u, v); got {len} floats")]
    InvalidOverlay { len: usize },

    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    ImageSize { expected: usize, actual: usize },

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Validation errors for procedural geometry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("geometry has no vertices")]
    Empty,

    #[error("position data length {0} is not a multiple of 3")]
    PositionStride(usize),

    #[error("index count {0} is not a multiple of 3")]
    IndexCount(usize),

    #[error("index {index} at position {position} is out of range for {vertices} vertices")]
    IndexOutOfRange {
        position: usize,
        index: u32,
        vertices: usize,
    },

    #[error("{stream} holds {actual} values, expected {expected}")]
    StreamLength {
        stream: &'static str,
        expected: usize,
        actual: usize,
    },
}

pub type Result<T, E = HordeError> = std::result::Result<T, E>;
