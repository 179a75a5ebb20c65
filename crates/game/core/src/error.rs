//! Common error infrastructure for swnr-core.
//!
//! Domain-specific errors (`ExprError`, `PoolKeyError`, `ValidationError`,
//! `RefreshError`) are defined next to the code that raises them. This module
//! provides the classification shared by all of them so that callers can pick
//! a recovery strategy without matching on every variant.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the engine substitutes a safe default and carries on
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: an update or record disagrees with itself
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Handled locally with a default value.
    ///
    /// Examples: unparsable pool formula (contributes 0), failing condition
    /// (treated as false)
    Recoverable,

    /// Invalid input, should not retry without changes.
    ///
    /// Examples: unknown refresh cadence, malformed pool key, skill rank below -1
    Validation,

    /// Unexpected state inconsistency.
    ///
    /// Examples: an update that references an item the actor no longer owns
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if the engine can continue with a default value.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all swnr-core errors.
///
/// - All error enums implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait EngineError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Used for log fields and test assertions.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
