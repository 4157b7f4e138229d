//! Common error infrastructure for battle-core.
//!
//! Domain-specific errors live next to the code that raises them
//! ([`MasterDataError`](crate::env::MasterDataError) in `env`,
//! [`BattleError`](crate::engine::BattleError) in `engine`). This module holds
//! the classification shared by all of them.
//!
//! # Taxonomy
//!
//! - **Configuration**: a referenced definition id is absent from master data.
//!   Fatal and never retried; master data and compiled effects are out of sync.
//! - **Invariant violations**: negative HP, duplicate status instances. These are
//!   programming errors and are guarded with `debug_assert!`, not surfaced.
//! - **Expected empty results**: no sacrifice target, nobody to revive. These are
//!   `Option`s, not errors.

/// Severity level of an error, used for categorization by callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input from the caller, e.g. an empty party.
    Validation,

    /// Unexpected state inconsistency inside the engine.
    Internal,

    /// Master data is inconsistent; the battle cannot be resolved.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates a data or engine bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all battle-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by what the caller can do about it
pub trait BattleFault: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
