//! Common error infrastructure for shadow-core.
//!
//! Nothing in the calculator is allowed to halt the process. Bad numeric input
//! is clamped, dangling references are skipped, and the few operations that can
//! refuse a request return a [`LedgerError`] while leaving the document
//! untouched.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same request may succeed after another edit
///   (for example once more shadow power is available)
/// - **Validation**: the request itself is malformed and is ignored
/// - **Internal**: the document is inconsistent; should be investigated
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
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

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all shadow-core errors.
///
/// Provides uniform classification so front-ends can decide whether to show
/// a hint, silently ignore the request, or log loudly.
pub trait ShadowError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a stable identifier for this error variant.
    fn error_code(&self) -> &'static str;
}

/// Refusals raised by the mutating operations of [`crate::ShadowFruit`].
///
/// Every variant is raised before any field of the document is written.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LedgerError {
    /// Ally targets need a display name.
    #[error("ally name must not be blank")]
    BlankAllyName,

    /// Custom buffs need a display name.
    #[error("custom buff name must not be blank")]
    BlankBuffName,

    /// Custom buffs must cost something.
    #[error("custom buff base cost must be positive, got {0}")]
    NonPositiveCost(i64),

    /// No corpse with the given name exists.
    #[error("corpse '{0}' not found")]
    CorpseNotFound(String),

    /// The opt-in spend cap refused another stack.
    #[error("next stack costs {cost} SPU but only {available} SPU is available")]
    SpendCapExceeded { cost: u64, available: u64 },
}

impl ShadowError for LedgerError {
    fn severity(&self) -> ErrorSeverity {
        use LedgerError::*;
        match self {
            BlankAllyName | BlankBuffName | NonPositiveCost(_) | CorpseNotFound(_) => {
                ErrorSeverity::Validation
            }
            SpendCapExceeded { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use LedgerError::*;
        match self {
            BlankAllyName => "LEDGER_BLANK_ALLY_NAME",
            BlankBuffName => "LEDGER_BLANK_BUFF_NAME",
            NonPositiveCost(_) => "LEDGER_NON_POSITIVE_COST",
            CorpseNotFound(_) => "LEDGER_CORPSE_NOT_FOUND",
            SpendCapExceeded { .. } => "LEDGER_SPEND_CAP_EXCEEDED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spend_cap_is_the_only_recoverable_refusal() {
        let cap = LedgerError::SpendCapExceeded {
            cost: 15,
            available: 3,
        };
        assert!(cap.severity().is_recoverable());
        assert_eq!(cap.error_code(), "LEDGER_SPEND_CAP_EXCEEDED");

        let blank = LedgerError::BlankAllyName;
        assert_eq!(blank.severity(), ErrorSeverity::Validation);
        assert_eq!(blank.severity().as_str(), "validation");
    }
}
