//! Port definitions (interfaces to the outside world)

pub mod directory_gateway;
