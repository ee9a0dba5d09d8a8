//! Capability probe use case
//!
//! Determines once per session whether the caller may use the privileged
//! enumeration path.

use crate::ports::directory_gateway::{DirectoryGateway, GatewayError};
use roster_domain::{CapabilityState, RosterKind};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while probing
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The privileged call failed for a reason other than a denied permission.
    /// The capability stays unresolved and the next probe retries the call.
    #[error("capability probe failed: {0}")]
    Transient(#[from] GatewayError),
}

/// Session-scoped, memoized check of the privileged enumeration path.
///
/// The permission cannot change within a session, so the first definitive
/// answer (success or denial) is cached and no further network call is made
/// until [`CapabilityProbe::reset`].
pub struct CapabilityProbe<G: DirectoryGateway + 'static> {
    gateway: Arc<G>,
    state: Mutex<CapabilityState>,
}

impl<G: DirectoryGateway + 'static> CapabilityProbe<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            state: Mutex::new(CapabilityState::Unknown),
        }
    }

    pub fn state(&self) -> CapabilityState {
        *self.state.lock().unwrap()
    }

    /// Forget the session's capability, e.g. after a role switch.
    pub fn reset(&self) {
        *self.state.lock().unwrap() = CapabilityState::Unknown;
    }

    /// Resolve the capability, issuing the privileged call only while the
    /// state is `Unknown`. A denied permission settles the state for the rest
    /// of the session.
    pub async fn probe(&self, kind: RosterKind) -> Result<CapabilityState, ProbeError> {
        let current = self.state();
        if current.is_resolved() {
            return Ok(current);
        }

        match self.gateway.list_center_members(kind).await {
            Ok(_) => {
                info!("privileged enumeration available, using the elevated path");
                self.settle(CapabilityState::Elevated);
                Ok(CapabilityState::Elevated)
            }
            Err(err) if err.is_permission_denied() => {
                debug!("privileged enumeration denied ({err}), settling on scoped fan-out");
                self.settle(CapabilityState::ScopedFallback);
                Ok(CapabilityState::ScopedFallback)
            }
            Err(err) => Err(ProbeError::Transient(err)),
        }
    }

    fn settle(&self, outcome: CapabilityState) {
        self.state.lock().unwrap().settle(outcome);
    }
}
