//! Behavior configuration.
//!
//! The bot's personality is five named numeric settings plus the fire
//! control utility weights. Loading falls back to built-in defaults on any
//! failure: a misconfigured bot should play with stock settings, not
//! refuse to play.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_CRITICAL_UTILITY, DEFAULT_DAMAGE_UTILITY, DEFAULT_KILL_UTILITY,
    DEFAULT_OVERHEAT_DISUTILITY,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read behavior settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse behavior settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Behavioral bias weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorSettings {
    /// Offense-vs-defense tradeoff in the bravery term.
    pub bravery: f64,
    /// Penalty scale on distance to the closest enemy.
    pub hyper_aggression: f64,
    /// Penalty scale on distance to the friendly centroid.
    pub herd_mentality: f64,
    /// Penalty scale on retreat distance to the home edge.
    pub self_preservation: f64,
    /// Penalty scale on piloting-failure probability.
    pub fall_shame: f64,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            bravery: 1.5,
            hyper_aggression: 1.0,
            herd_mentality: 0.25,
            self_preservation: 2.0,
            fall_shame: 50.0,
        }
    }
}

impl BehaviorSettings {
    /// Load settings from a JSON file, falling back to defaults on any
    /// failure. The failure is reported once, here.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::error!("behavior settings unusable ({err}); using defaults");
                Self::default()
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Utility weights for the fire control planner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireControlWeights {
    pub damage: f64,
    pub critical: f64,
    pub kill: f64,
    pub overheat: f64,
}

impl Default for FireControlWeights {
    fn default() -> Self {
        Self {
            damage: DEFAULT_DAMAGE_UTILITY,
            critical: DEFAULT_CRITICAL_UTILITY,
            kill: DEFAULT_KILL_UTILITY,
            overheat: DEFAULT_OVERHEAT_DISUTILITY,
        }
    }
}
