//! Crash severity bands and their heat-layer weights

use crate::BridgeError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Severity of a crash, determined by the worst injury recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    NonInjury,
    Minor,
    Serious,
    Fatal,
}

impl Severity {
    /// Heat-layer weight in [0, 1], 1 being fatal.
    pub fn heat_weight(&self) -> f64 {
        match self {
            Severity::NonInjury => 0.25,
            Severity::Minor => 0.5,
            Severity::Serious => 0.75,
            Severity::Fatal => 1.0,
        }
    }
}

impl FromStr for Severity {
    type Err = BridgeError;

    /// Accepts both the dataset's single-letter codes and its display
    /// strings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" | "Non-Injury Crash" => Ok(Severity::NonInjury),
            "M" | "Minor Crash" => Ok(Severity::Minor),
            "S" | "Serious Crash" => Ok(Severity::Serious),
            "F" | "Fatal Crash" => Ok(Severity::Fatal),
            other => Err(BridgeError::UnknownSeverity(other.to_string())),
        }
    }
}
