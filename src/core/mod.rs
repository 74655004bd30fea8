//! Core module - configuration, data model, rendering, errors

pub mod config;
pub mod error;
pub mod model;
pub mod render;
