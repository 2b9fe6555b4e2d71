//! Error types for pinecone_core.
//!
//! Every failure originates from caller-supplied parameters: grid sizes, fault
//! rates, core indices, or configuration files. Stepping a validly constructed
//! engine never fails.

use thiserror::Error;

/// Main error type for pinecone_core operations.
#[derive(Error, Debug)]
pub enum AutomataError {
    /// Grid side length of zero
    #[error("Invalid grid size: {0} (must be at least 1)")]
    InvalidGridSize(usize),

    /// Fault rate outside [0, 1] or NaN
    #[error("Invalid fault injection rate: {0} (must be within 0.0..=1.0)")]
    InvalidFaultRate(f64),

    /// Core index outside 0..4
    #[error("Invalid core index: {0} (quad-core engines have cores 0..=3)")]
    InvalidCore(usize),

    /// Cell coordinates outside the grid
    #[error("Cell ({row}, {col}) is outside a {size}x{size} grid")]
    CellOutOfBounds { row: usize, col: usize, size: usize },

    /// Supplied grid does not match the engine's dimensions
    #[error("Grid size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// TOML parsing errors
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("Config serialization error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<AutomataError>,
    },
}

/// Result type alias for pinecone_core operations.
pub type Result<T> = std::result::Result<T, AutomataError>;

impl AutomataError {
    /// Creates a new validation error.
    #[must_use]
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Wraps an error with additional context.
    #[must_use]
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// True for errors caused by a bad parameter rather than the environment.
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::InvalidGridSize(_)
            | Self::InvalidFaultRate(_)
            | Self::InvalidCore(_)
            | Self::CellOutOfBounds { .. }
            | Self::SizeMismatch { .. }
            | Self::ConfigParse(_)
            | Self::Validation(_) => true,
            Self::ConfigSerialize(_) | Self::FileSystem(_) => false,
            Self::Context { source, .. } => source.is_configuration(),
        }
    }
}

/// Rejects a zero side length.
pub(crate) fn check_grid_size(size: usize) -> Result<()> {
    if size == 0 {
        return Err(AutomataError::InvalidGridSize(size));
    }
    Ok(())
}

/// Rejects NaN and rates outside the unit interval.
pub(crate) fn check_fault_rate(rate: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(AutomataError::InvalidFaultRate(rate));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AutomataError::InvalidGridSize(0);
        assert_eq!(err.to_string(), "Invalid grid size: 0 (must be at least 1)");
    }

    #[test]
    fn test_error_context() {
        let err = AutomataError::validation("bad rate").with_context("loading config");
        assert!(err.to_string().contains("loading config"));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AutomataError = io_err.into();
        assert!(matches!(err, AutomataError::FileSystem(_)));
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_fault_rate_bounds() {
        assert!(check_fault_rate(0.0).is_ok());
        assert!(check_fault_rate(1.0).is_ok());
        assert!(check_fault_rate(-0.01).is_err());
        assert!(check_fault_rate(1.5).is_err());
        assert!(check_fault_rate(f64::NAN).is_err());
    }
}
