use thiserror::Error;

/// Errors raised at the rig's API boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RigError {
    /// A selector value outside its closed enumeration
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A restored snapshot that does not describe this rig
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Result type using RigError
pub type Result<T> = std::result::Result<T, RigError>;
