//! Error type definitions for cryptographic operations

use thiserror::Error as ThisError;

/// Primary error type for cryptographic operations
///
/// Variants only ever hold `&'static str` context and public sizes. Nothing
/// derived from a key, a plaintext or a tag is stored here.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A finalize-once object was used after it was finalized, or a
    /// single-use context was driven in the wrong direction.
    #[error("{context}: invalid state ({reason})")]
    InvalidState {
        /// Object that was misused
        context: &'static str,
        /// What was attempted
        reason: &'static str,
    },

    /// Key bytes do not match the size required by the key's purpose
    #[error("invalid key length for {purpose}: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Purpose label the key was being bound to
        purpose: &'static str,
        /// Required key size in bytes
        expected: usize,
        /// Supplied key size in bytes
        actual: usize,
    },

    /// A key bound to one purpose was handed to a different algorithm
    #[error("key bound to {actual} cannot be used for {expected}")]
    KeyWrongAlgorithm {
        /// Purpose the operation requires
        expected: &'static str,
        /// Purpose the key carries
        actual: &'static str,
    },

    /// AEAD or MAC verification failed.
    ///
    /// Deliberately undifferentiated: it never says whether the tag, the
    /// ciphertext or the associated data was at fault.
    #[error("authentication failed for {algorithm}")]
    AuthenticationFailed {
        /// Algorithm that rejected the input
        algorithm: &'static str,
    },

    /// The operating system CSPRNG reported an error. Fatal: callers must
    /// abort the operation that needed randomness.
    #[error("entropy unavailable: {context}")]
    EntropyUnavailable {
        /// Where the failure surfaced
        context: &'static str,
        /// Raw OS error code, when the platform supplied one
        code: Option<u32>,
    },

    /// A non-key buffer (nonce, tag, digest, encoded package) had the wrong size
    #[error("{context}: invalid length (expected {expected}, got {actual})")]
    InvalidLength {
        /// Buffer that was rejected
        context: &'static str,
        /// Expected size in bytes
        expected: usize,
        /// Actual size in bytes
        actual: usize,
    },

    /// An argument was outside the range the algorithm accepts
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Name of the parameter
        name: &'static str,
        /// Why it was rejected
        reason: &'static str,
    },
}

/// Coarse classification of [`Error`], convenient for matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::InvalidState`]
    InvalidState,
    /// See [`Error::InvalidKeyLength`]
    InvalidKeyLength,
    /// See [`Error::KeyWrongAlgorithm`]
    KeyWrongAlgorithm,
    /// See [`Error::AuthenticationFailed`]
    AuthenticationFailed,
    /// See [`Error::EntropyUnavailable`]
    EntropyUnavailable,
    /// See [`Error::InvalidLength`]
    InvalidLength,
    /// See [`Error::InvalidParameter`]
    InvalidParameter,
}

/// Result type for cryptographic operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Shorthand to create an `InvalidParameter` error
    pub fn param(name: &'static str, reason: &'static str) -> Self {
        Error::InvalidParameter { name, reason }
    }

    /// Shorthand to create an `InvalidState` error
    pub fn state(context: &'static str, reason: &'static str) -> Self {
        Error::InvalidState { context, reason }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::InvalidKeyLength { .. } => ErrorKind::InvalidKeyLength,
            Self::KeyWrongAlgorithm { .. } => ErrorKind::KeyWrongAlgorithm,
            Self::AuthenticationFailed { .. } => ErrorKind::AuthenticationFailed,
            Self::EntropyUnavailable { .. } => ErrorKind::EntropyUnavailable,
            Self::InvalidLength { .. } => ErrorKind::InvalidLength,
            Self::InvalidParameter { .. } => ErrorKind::InvalidParameter,
        }
    }

    /// Whether the error means the process can no longer obtain randomness.
    ///
    /// Such errors must never be answered by retrying with a weaker source.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::EntropyUnavailable { .. })
    }

    /// Replace the static context of an error, keeping its payload
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::InvalidState { reason, .. } => Self::InvalidState { context, reason },
            Self::InvalidLength {
                expected, actual, ..
            } => Self::InvalidLength {
                context,
                expected,
                actual,
            },
            Self::EntropyUnavailable { code, .. } => Self::EntropyUnavailable { context, code },
            // The remaining variants are keyed by algorithm or purpose, which
            // is already the most precise context available.
            other => other,
        }
    }
}
