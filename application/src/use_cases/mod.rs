//! Use cases (application services)

pub mod fetch_roster;
pub mod probe_capability;
pub mod roster_session;
