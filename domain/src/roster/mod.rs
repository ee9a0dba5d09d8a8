//! Role-adaptive roster aggregation.
//!
//! Types flow leaf to root: raw [`envelope`]s normalize into [`record`]s,
//! records arrive grouped into [`branch`]es, and [`aggregate`] merges branches
//! into the [`person`] sequence a [`snapshot`] publishes.

pub mod aggregate;
pub mod branch;
pub mod capability;
pub mod envelope;
pub mod group;
pub mod kind;
pub mod person;
pub mod record;
pub mod snapshot;
