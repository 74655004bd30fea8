//! Ownership - manifest parsing, rule matching, resolution

pub mod manifest;
pub mod resolve;
