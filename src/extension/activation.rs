//! Activation decisions
//!
//! Pure reconciliation of an extension's declared mode mask against the
//! process-wide active mode. No side effects; exhaustively table-testable.

use crate::extension::modes::RunMode;

/// Outcome of an activation decision for one extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    /// Whether the extension should activate under the current mode.
    pub eligible: bool,
    /// Names of the modes the extension is eligible under, independent of
    /// whether the active mode currently matches.
    pub eligible_modes: Vec<&'static str>,
}

/// Decide whether an extension declaring `declared` activates under
/// `active`: eligible exactly when the two masks overlap.
pub fn decide(declared: RunMode, active: RunMode) -> Activation {
    Activation {
        eligible: declared.includes(active),
        eligible_modes: declared.names(),
    }
}
