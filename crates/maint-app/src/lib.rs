//! Application service layer - configuration and export

pub mod config;
pub mod export;
