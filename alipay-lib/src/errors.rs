//! Error types for Alipay client operations.
//!
//! Signing and verification never surface these to callers of the
//! high-level client: they are folded into [`crate::signing::SignOutcome`]
//! or a `false` verification result. The detailed variants stay available
//! to callers that ask for them (see [`crate::AlipayClient::check_callback`]).

use std::fmt;

/// Which side of the RSA keypair a key error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    /// Merchant private key, used for signing requests.
    Private,
    /// Gateway public key, used for verifying notifications.
    Public,
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Private => write!(f, "private key"),
            Self::Public => write!(f, "public key"),
        }
    }
}

/// Error codes for FFI and service-boundary integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum AlipayErrorCode {
    /// Key material could not be parsed
    InvalidKey = 1000,
    /// RSA signing failed
    Signing = 2000,
    /// Signature verification failed
    Verification = 3000,
    /// Callback carried no `sign` field
    MissingSignature = 3001,
    /// A field could not be decoded
    InvalidEncoding = 4000,
    /// Amount could not be parsed
    InvalidAmount = 4001,
    /// Signature algorithm tag is not supported
    UnsupportedSignType = 4002,
    /// Serialization error
    Serialization = 5000,
    /// Configuration error
    Config = 6000,
}

/// Error type for Alipay client operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlipayError {
    /// Key material could not be parsed for the given role.
    #[error("invalid {role}: {reason}")]
    InvalidKey {
        /// Which key failed
        role: KeyRole,
        /// Underlying parser message
        reason: String,
    },

    /// RSA signing failed.
    #[error("signing failed: {0}")]
    Signing(String),

    /// Signature did not verify.
    #[error("signature verification failed: {0}")]
    Verification(String),

    /// The notification body had no `sign` field.
    #[error("notification carries no sign field")]
    MissingSignature,

    /// A field could not be decoded.
    #[error("invalid encoding in {field}: {reason}")]
    InvalidEncoding {
        /// Field or parameter name
        field: String,
        /// Reason for the failure
        reason: String,
    },

    /// Amount could not be parsed.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Only RSA2 is supported.
    #[error("unsupported sign type: {0}")]
    UnsupportedSignType(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}

impl AlipayError {
    /// Get the error code for FFI/service integration.
    pub fn code(&self) -> AlipayErrorCode {
        match self {
            Self::InvalidKey { .. } => AlipayErrorCode::InvalidKey,
            Self::Signing(_) => AlipayErrorCode::Signing,
            Self::Verification(_) => AlipayErrorCode::Verification,
            Self::MissingSignature => AlipayErrorCode::MissingSignature,
            Self::InvalidEncoding { .. } => AlipayErrorCode::InvalidEncoding,
            Self::InvalidAmount(_) => AlipayErrorCode::InvalidAmount,
            Self::UnsupportedSignType(_) => AlipayErrorCode::UnsupportedSignType,
            Self::Serialization(_) => AlipayErrorCode::Serialization,
            Self::Config(_) => AlipayErrorCode::Config,
        }
    }

    /// Returns true for failures caused by key material rather than by the data.
    pub fn is_key_error(&self) -> bool {
        matches!(self, Self::InvalidKey { .. })
    }

    /// Create an invalid key error.
    pub fn invalid_key(role: KeyRole, reason: impl fmt::Display) -> Self {
        Self::InvalidKey {
            role,
            reason: reason.to_string(),
        }
    }

    /// Create an invalid encoding error.
    pub fn invalid_encoding(field: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::InvalidEncoding {
            field: field.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for AlipayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
