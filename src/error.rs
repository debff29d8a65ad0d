use thiserror::Error;

/// Error type for this crate.
///
/// Every failure is fatal and reported before any partial construction:
/// a genealogy with a silently dropped edge would corrupt every
/// downstream computation that depends on the parent/child invariants.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PedigreeError {
    /// Unsupported or contradictory settings (ploidy, sex assignment,
    /// sampling selectors, simulation parameters).
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Invalid pedigree contents (identifiers, time ordering, column
    /// layouts, malformed exchange rows).
    #[error("validation error: {0}")]
    Validation(String),
    /// An identifier that should resolve to an individual does not.
    #[error("lookup error: {0}")]
    Lookup(String),
    /// A key that must be unique appears more than once.
    #[error("reference integrity error: {0}")]
    ReferenceIntegrity(String),
    /// Malformed text or array input.
    #[error("format error: {0}")]
    Format(String),
    #[error(transparent)]
    /// Errors coming from `std::io`.
    Io(#[from] std::io::Error),
    #[error(transparent)]
    /// Errors coming from `bincode`.
    Bincode(#[from] bincode::Error),
    #[error(transparent)]
    /// Errors coming from `serde_json`.
    Json(#[from] serde_json::Error),
}
