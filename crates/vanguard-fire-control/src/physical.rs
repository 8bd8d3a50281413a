//! Physical-attack estimation.
//!
//! Mirrors the weapon path with a fixed maximum-damage-by-chassis table
//! and an adjacent-hex, arc-constrained to-hit guesser.

use serde::{Deserialize, Serialize};

use vanguard_core::enums::{AttackDirection, PhysicalKind, UnitKind};
use vanguard_core::game::Game;
use vanguard_core::rules::{attack_direction, probability_of_roll, target_movement_modifier};
use vanguard_core::types::UnitId;
use vanguard_core::unit::Unit;

use crate::shot::{expected_criticals_and_kill, Target};
use crate::state::EntityState;

/// Estimate of one physical attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalInfo {
    pub shooter: UnitId,
    pub target: UnitId,
    pub kind: PhysicalKind,
    pub to_hit: i32,
    pub probability_to_hit: f64,
    pub expected_damage_on_hit: f64,
    pub expected_criticals: f64,
    pub kill_probability: f64,
    pub damage_direction: AttackDirection,
}

impl PhysicalInfo {
    pub fn expected_damage(&self) -> f64 {
        self.probability_to_hit * self.expected_damage_on_hit
    }

    /// Estimate a kick or punch. `None` when impossible: wrong chassis,
    /// prone attacker, not adjacent, out of arc, missing actuators,
    /// elevation mismatch, or a scenario rule banning physicals.
    pub fn estimate(
        game: &Game,
        shooter: &Unit,
        shooter_state: &EntityState,
        kind: PhysicalKind,
        target: &Unit,
        target_state: &EntityState,
    ) -> Option<Self> {
        if shooter.kind != UnitKind::Mek || shooter_state.prone || shooter.shutdown {
            return None;
        }
        if game.no_physical_player == Some(shooter.owner) {
            return None;
        }
        if shooter_state.position.distance(&target_state.position) != 1 {
            return None;
        }
        let shooter_level = game
            .board
            .hex(&shooter_state.position)
            .map_or(0, |h| h.level);
        let target_level = game
            .board
            .hex(&target_state.position)
            .map_or(0, |h| h.level);
        if (shooter_level - target_level).abs() > 1 {
            return None;
        }

        let direction = shooter_state.position.direction_to(&target_state.position);
        let (base_to_hit, damage) = match kind {
            PhysicalKind::Kick => {
                // Legs don't twist: kicks come off the body facing.
                if shooter_state.facing.rotation_distance(direction) > 1 {
                    return None;
                }
                if shooter.leg_destroyed.iter().any(|d| *d) {
                    return None;
                }
                (shooter.piloting - 2, shooter.kick_damage())
            }
            PhysicalKind::Punch => {
                if shooter_state
                    .secondary_facing
                    .rotation_distance(direction)
                    > 1
                {
                    return None;
                }
                if shooter.arm_destroyed.iter().all(|d| *d) {
                    return None;
                }
                // Can't punch something lying at your feet.
                if target_state.prone {
                    return None;
                }
                (shooter.piloting, shooter.punch_damage())
            }
        };

        let mut to_hit =
            base_to_hit + target_movement_modifier(target_state.hexes_moved, target_state.jumping);
        if target_state.prone {
            to_hit -= 2;
        }
        if target_state.immobile {
            to_hit -= 4;
        }

        let probability_to_hit = probability_of_roll(to_hit);
        if probability_to_hit <= 0.0 {
            return None;
        }

        let toward_attacker = target_state.position.direction_to(&shooter_state.position);
        let damage_direction = attack_direction(target_state.facing, toward_attacker);
        let (criticals_on_hit, kill_on_hit) =
            expected_criticals_and_kill(damage, damage_direction, &Target::Unit(target));

        Some(Self {
            shooter: shooter.id,
            target: target.id,
            kind,
            to_hit,
            probability_to_hit,
            expected_damage_on_hit: damage,
            expected_criticals: probability_to_hit * criticals_on_hit,
            kill_probability: probability_to_hit * kill_on_hit,
            damage_direction,
        })
    }
}
