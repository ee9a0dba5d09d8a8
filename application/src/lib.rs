//! Application layer for academy-roster
//!
//! This crate contains the roster use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::directory_gateway::{DirectoryGateway, GatewayError};
pub use use_cases::fetch_roster::{FetchError, RosterFetcher};
pub use use_cases::probe_capability::{CapabilityProbe, ProbeError};
pub use use_cases::roster_session::{ReloadError, RosterSession, SessionPhase};
