//! Core types for maintenance sheet checking

mod error;

pub use error::*;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output format for results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Row filter selected on the command line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lower")]
pub enum FilterMode {
    /// Every row with a vehicle and at least one other populated field
    #[default]
    All,
    /// Accident damage, not yet checked in
    Accident,
    /// Plate on the Invygo reference list, not yet checked in
    Invygo,
    /// Date-in filled
    Ready,
    /// Date-in empty
    NotReady,
    /// Plate shared by more than one unresolved row
    Duplicates,
    /// Delay threshold exceeded
    Delayed,
    /// "total loss" appears anywhere in the row
    TotalLoss,
}

impl FilterMode {
    /// Label used for export file names and report headings
    pub fn label(&self) -> &'static str {
        match self {
            FilterMode::All => "Maintenance",
            FilterMode::Accident => "Accident",
            FilterMode::Invygo => "Invygo",
            FilterMode::Ready => "Ready",
            FilterMode::NotReady => "NotReady",
            FilterMode::Duplicates => "Duplicates",
            FilterMode::Delayed => "Delayed",
            FilterMode::TotalLoss => "TotalLoss",
        }
    }
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // matches the command-line value names
        let name = match self {
            FilterMode::All => "all",
            FilterMode::Accident => "accident",
            FilterMode::Invygo => "invygo",
            FilterMode::Ready => "ready",
            FilterMode::NotReady => "notready",
            FilterMode::Duplicates => "duplicates",
            FilterMode::Delayed => "delayed",
            FilterMode::TotalLoss => "totalloss",
        };
        write!(f, "{}", name)
    }
}

/// Fleet ownership category, decided by reference plate list membership
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarType {
    Invygo,
    #[default]
    Other,
}

impl std::fmt::Display for CarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CarType::Invygo => write!(f, "Invygo"),
            CarType::Other => write!(f, "Other"),
        }
    }
}

/// Repair progress of a single maintenance row
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepairStatus {
    /// Still out past the damage-specific threshold
    Delayed,
    /// Accident damage, waiting for check-in
    Accident,
    /// Checked back in
    Repaired,
    #[default]
    NotRepaired,
}

impl RepairStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RepairStatus::Delayed => "Delayed",
            RepairStatus::Accident => "Accident",
            RepairStatus::Repaired => "Repaired",
            RepairStatus::NotRepaired => "Not Repaired",
        }
    }
}

impl std::fmt::Display for RepairStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
