//! Candidate movement paths.

use serde::{Deserialize, Serialize};

use vanguard_core::enums::MovementKind;
use vanguard_core::rules::probability_of_roll;
use vanguard_core::types::{Facing, HexCoord, UnitId};
use vanguard_core::unit::Unit;

/// One step of a movement path: the hex and facing occupied after the
/// step, and what the step cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStep {
    pub hex: HexCoord,
    pub facing: Facing,
    pub mp_cost: u32,
}

/// A candidate movement path for one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovePath {
    pub unit: UnitId,
    pub start_hex: HexCoord,
    pub start_facing: Facing,
    pub steps: Vec<MoveStep>,
    pub kind: MovementKind,
    /// Piloting-roll targets accrued by hazardous steps. The path only
    /// "succeeds" if every roll does.
    pub psr_targets: Vec<i32>,
    /// Aircraft: the path ends with the unit at zero velocity (stall).
    pub ends_at_zero_velocity: bool,
    /// Aircraft: the path ends below minimum safe altitude (crash).
    pub below_min_altitude: bool,
    /// The path leaves the board via an edge-return step.
    pub off_board_return: bool,
}

impl MovePath {
    /// The do-nothing path: stand in place, keep facing.
    /// `None` if the unit is not on the board.
    pub fn stationary(unit: &Unit) -> Option<Self> {
        let position = unit.position?;
        Some(Self {
            unit: unit.id,
            start_hex: position,
            start_facing: unit.facing,
            steps: Vec::new(),
            kind: MovementKind::StandStill,
            psr_targets: Vec::new(),
            ends_at_zero_velocity: false,
            below_min_altitude: false,
            off_board_return: false,
        })
    }

    /// Final hex, or `None` when the path leaves the board.
    pub fn final_coords(&self) -> Option<HexCoord> {
        if self.off_board_return {
            return None;
        }
        Some(self.steps.last().map_or(self.start_hex, |s| s.hex))
    }

    pub fn final_facing(&self) -> Facing {
        self.steps.last().map_or(self.start_facing, |s| s.facing)
    }

    /// Number of distinct hexes entered (turns in place don't count).
    pub fn hexes_moved(&self) -> u32 {
        let mut current = self.start_hex;
        let mut moved = 0;
        for step in &self.steps {
            if step.hex != current {
                moved += 1;
                current = step.hex;
            }
        }
        moved
    }

    pub fn is_jumping(&self) -> bool {
        self.kind == MovementKind::Jump
    }

    pub fn mp_used(&self) -> u32 {
        self.steps.iter().map(|s| s.mp_cost).sum()
    }

    /// Heat generated by the final movement step, projected onto the
    /// unit's heat when evaluating the path hypothetically.
    pub fn last_step_heat(&self) -> u32 {
        match self.kind {
            MovementKind::StandStill => 0,
            MovementKind::Walk => 1,
            MovementKind::Run => 2,
            MovementKind::Jump => self.hexes_moved().max(3),
        }
    }

    /// Probability that every piloting roll this path demands succeeds.
    pub fn success_probability(&self) -> f64 {
        self.psr_targets
            .iter()
            .map(|t| probability_of_roll(*t))
            .product()
    }

    /// Canonical key: same key, same path. Feeds the stable tie-break hash.
    pub fn key(&self) -> String {
        use std::fmt::Write;
        let mut key = format!(
            "{}:{},{}f{}",
            self.unit,
            self.start_hex.q,
            self.start_hex.r,
            self.start_facing.value()
        );
        for step in &self.steps {
            let _ = write!(
                key,
                ">{},{}f{}",
                step.hex.q,
                step.hex.r,
                step.facing.value()
            );
        }
        let _ = write!(key, ":{:?}", self.kind);
        if self.ends_at_zero_velocity {
            key.push_str(":stall");
        }
        if self.below_min_altitude {
            key.push_str(":low");
        }
        if self.off_board_return {
            key.push_str(":return");
        }
        key
    }

    /// FNV-1a hash of the canonical key. Deterministic across runs and
    /// platforms, unlike the std hasher.
    pub fn stable_hash(&self) -> u64 {
        const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
        const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;
        let mut hash = FNV_OFFSET;
        for byte in self.key().as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        hash
    }
}
