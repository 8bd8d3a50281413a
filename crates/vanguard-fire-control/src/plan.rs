//! Firing plans.

use serde::{Deserialize, Serialize};

use crate::physical::PhysicalInfo;
use crate::shot::WeaponFireInfo;

/// An ordered set of weapon firings plus an optional torso twist.
/// Aggregates are computed from the member list on demand; the only
/// stored derived value is the utility the planner assigned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FiringPlan {
    shots: Vec<WeaponFireInfo>,
    /// -1 = twist left, 0 = none, +1 = twist right.
    pub twist: i8,
    /// Meaningful only after the planner's utility function has run.
    /// An empty plan has utility 0.
    pub utility: f64,
}

impl FiringPlan {
    pub fn new(twist: i8) -> Self {
        Self {
            shots: Vec::new(),
            twist,
            utility: 0.0,
        }
    }

    /// Add a shot. Refuses a weapon already in the plan; the weapon index
    /// is the identity.
    pub fn push(&mut self, shot: WeaponFireInfo) -> bool {
        if self.contains_weapon(shot.weapon_index) {
            return false;
        }
        self.shots.push(shot);
        true
    }

    pub fn contains_weapon(&self, weapon_index: usize) -> bool {
        self.shots.iter().any(|s| s.weapon_index == weapon_index)
    }

    pub fn shots(&self) -> &[WeaponFireInfo] {
        &self.shots
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn heat(&self) -> u32 {
        self.shots.iter().map(|s| s.heat).sum()
    }

    pub fn expected_damage(&self) -> f64 {
        self.shots.iter().map(|s| s.expected_damage()).sum()
    }

    pub fn expected_criticals(&self) -> f64 {
        self.shots.iter().map(|s| s.expected_criticals).sum()
    }

    /// Probability at least one shot kills: 1 - prod(1 - k_i).
    pub fn kill_probability(&self) -> f64 {
        1.0 - self
            .shots
            .iter()
            .map(|s| 1.0 - s.kill_probability)
            .product::<f64>()
    }

    /// Human-readable description for later inspection. Diagnostic only.
    pub fn describe(&self) -> String {
        use std::fmt::Write;
        let mut out = format!(
            "plan[twist {}, heat {}, damage {:.2}, crits {:.3}, kill {:.3}, utility {:.2}]",
            self.twist,
            self.heat(),
            self.expected_damage(),
            self.expected_criticals(),
            self.kill_probability(),
            self.utility
        );
        for shot in &self.shots {
            let _ = write!(
                out,
                " w{}@{:.0}%",
                shot.weapon_index,
                shot.probability_to_hit * 100.0
            );
        }
        out
    }
}

/// A chosen physical attack plus its utility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalPlan {
    pub attack: PhysicalInfo,
    pub utility: f64,
}
