//! Domain layer: sheet records, classification rules, filtering, state

pub mod model;
pub mod repository;
pub mod service;
pub mod state;
