//! The read-only game-state model the engine consumes.
//!
//! The authoritative rules engine owns this data; the decision crates only
//! query it. `BTreeMap` keeps every iteration in ascending unit-id order,
//! which the precomputation engine relies on for deterministic drains.

use std::collections::BTreeMap;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::enums::GamePhase;
use crate::types::{HexCoord, UnitId};
use crate::unit::Unit;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub board: Board,
    pub phase: GamePhase,
    pub units: BTreeMap<UnitId, Unit>,
    /// Non-unit objectives (buildings, supply dumps) worth shooting at.
    pub strategic_targets: Vec<HexCoord>,
    /// Player barred from physical attacks by scenario rule, if any.
    pub no_physical_player: Option<u32>,
}

impl Game {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            phase: GamePhase::default(),
            units: BTreeMap::new(),
            strategic_targets: Vec::new(),
            no_physical_player: None,
        }
    }

    pub fn add_unit(&mut self, unit: Unit) {
        self.units.insert(unit.id, unit);
    }

    pub fn remove_unit(&mut self, id: UnitId) {
        self.units.remove(&id);
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    /// Deployed, live enemies of the given player, ascending id.
    pub fn enemies_of(&self, player: u32) -> Vec<&Unit> {
        self.units
            .values()
            .filter(|u| u.owner != player && u.is_deployed())
            .collect()
    }

    /// Deployed, live friends of the given player, ascending id.
    pub fn friends_of(&self, player: u32) -> Vec<&Unit> {
        self.units
            .values()
            .filter(|u| u.owner == player && u.is_deployed())
            .collect()
    }

    /// Cartesian centroid of the player's deployed units, optionally
    /// excluding one unit (usually the one being moved). `None` when the
    /// player has no other deployed units.
    pub fn friendly_centroid(&self, player: u32, exclude: Option<UnitId>) -> Option<DVec2> {
        let mut sum = DVec2::ZERO;
        let mut count = 0u32;
        for unit in self.units.values() {
            if unit.owner != player || Some(unit.id) == exclude {
                continue;
            }
            if let Some(pos) = unit.position {
                if !unit.destroyed {
                    sum += pos.to_cartesian();
                    count += 1;
                }
            }
        }
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }
}
