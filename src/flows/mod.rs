//! Flows - multi-step operations composed from the other modules

pub mod audit;
