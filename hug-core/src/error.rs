//! Error types for hug chains

use thiserror::Error;

/// Hug error types
#[derive(Debug, Error)]
pub enum HugError {
    /// Invoked a member name that was never synthesized on the wrapper.
    #[error("No such member: {name}")]
    NoSuchMember {
        /// The member name that was invoked
        name: String,
    },
    /// A function-kind proxy whose underlying attribute no longer holds a
    /// function. Proxy kinds are fixed at wrap time; the attribute changed
    /// underneath.
    #[error("Member is not callable: {name}")]
    NotCallable {
        /// The member name that was invoked
        name: String,
    },
    /// A chain operation was applied after the chain already ended.
    #[error("Chain already ended")]
    ChainEnded,
    /// A filter pattern failed to compile.
    #[error("Invalid filter pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, HugError>;
