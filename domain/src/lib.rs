//! Domain layer for academy-roster
//!
//! This crate contains the core types and the deterministic aggregation
//! algorithm behind staff roster views. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Role-adaptive enumeration
//!
//! A privileged caller ("center admin") can enumerate a whole roster in one
//! backend call. A non-privileged caller (teacher or assistant) must discover
//! the groups it owns and fan out one request per group, merging the results
//! client-side while deduplicating people that appear in several groups.
//!
//! ## Deterministic merge
//!
//! The aggregator consumes branches in request order, never completion order,
//! so two loads over the same inputs always produce the identical roster.

pub mod roster;

// Re-export commonly used types
pub use roster::aggregate::aggregate;
pub use roster::branch::FetchBranch;
pub use roster::capability::CapabilityState;
pub use roster::envelope::{Envelope, strip_data_wrapper, unwrap_collection};
pub use roster::group::{CenterRef, GroupId, GroupRef};
pub use roster::kind::RosterKind;
pub use roster::person::{Person, PersonId};
pub use roster::record::RawRecord;
pub use roster::snapshot::RosterSnapshot;
