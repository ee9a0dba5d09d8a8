//! Session capability state for the privileged enumeration path.

use serde::{Deserialize, Serialize};

/// Whether the caller may use the privileged enumeration endpoint.
///
/// Resolved at most once per session: `Unknown` settles to `Elevated` or
/// `ScopedFallback` and never reverts. The backend permission cannot change
/// mid-session, so a settled state is never probed again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityState {
    #[default]
    Unknown,
    Elevated,
    ScopedFallback,
}

impl CapabilityState {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, CapabilityState::Unknown)
    }

    /// Settle an unresolved state. Settled states ignore further outcomes.
    pub fn settle(&mut self, outcome: CapabilityState) {
        if !self.is_resolved() && outcome.is_resolved() {
            *self = outcome;
        }
    }
}
