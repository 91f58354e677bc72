// src/error.rs
//! Error types for the plotter library.

/// Error returned by pixel buffer construction and copy accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Supplied storage does not hold exactly `width * height` cells.
    SizeMismatch { expected: usize, actual: usize },
    /// Copy destination is smaller than the buffer contents.
    DestinationTooSmall { required: usize, actual: usize },
    /// External storage pointer was null.
    NullStorage,
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::SizeMismatch { expected, actual } => write!(
                f,
                "pixel storage holds {} cells, expected {}",
                actual, expected
            ),
            BufferError::DestinationTooSmall { required, actual } => write!(
                f,
                "copy destination holds {} units, buffer needs {}",
                actual, required
            ),
            BufferError::NullStorage => write!(f, "external pixel storage is null"),
        }
    }
}

impl std::error::Error for BufferError {}

/// Integer matrix identifier that names neither the modelview (0) nor the
/// projection (1) matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidMatrixTarget(pub i32);

impl std::fmt::Display for InvalidMatrixTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid matrix target {} (expected 0 for modelview or 1 for projection)",
            self.0
        )
    }
}

impl std::error::Error for InvalidMatrixTarget {}
