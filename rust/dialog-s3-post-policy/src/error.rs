use thiserror::Error;

/// Errors raised when a POST policy is populated incorrectly.
///
/// These are caller mistakes. They are reported at the call site and are
/// never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// A condition lookup was made with an empty key
    #[error("Condition key must not be empty")]
    EmptyKey,

    /// A condition lookup was made for a key that is not set
    #[error("Condition {0} not found")]
    UnknownKey(String),

    /// A match rule was requested with an unrecognized token
    #[error("Unknown match kind {0:?}, expected \"eq\" or \"starts-with\"")]
    InvalidMatchKind(String),

    /// A range condition was requested with its bounds reversed
    #[error("Invalid range: min {min} is greater than max {max}")]
    InvertedRange {
        /// The requested lower bound
        min: i64,
        /// The requested upper bound
        max: i64,
    },

    /// A canned ACL name was not recognized
    #[error("Unknown canned ACL {0:?}")]
    InvalidAcl(String),

    /// The requested expiration cannot be represented as a point in time
    #[error("Expiration is out of range")]
    ExpirationOutOfRange,
}
