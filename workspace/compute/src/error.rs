use thiserror::Error;

/// Error types for the compute crate
#[derive(Error, Debug)]
pub enum ComputeError {
    /// A field mapping was declared without any fields
    #[error("field mapping has no fields")]
    EmptyMapping,

    /// Two mapping entries declared the same output key
    #[error("duplicate output key in field mapping: {0}")]
    DuplicateKey(String),

    /// Error reported by a chart renderer backend
    #[error("render error: {0}")]
    Render(String),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
