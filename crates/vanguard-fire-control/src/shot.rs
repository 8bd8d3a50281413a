//! Weapon-fire estimation.

use serde::{Deserialize, Serialize};

use vanguard_core::enums::{ArcKind, AttackDirection, HitLocation, UnitKind};
use vanguard_core::game::Game;
use vanguard_core::rules::{
    attack_direction, heat_to_hit_modifier, hit_location_probability, probability_of_roll,
    target_movement_modifier, EXPECTED_CRITICALS_PER_BREACH,
};
use vanguard_core::types::{HexCoord, UnitId};
use vanguard_core::unit::{Unit, Weapon};

use crate::state::EntityState;

/// What is being shot at: an enemy unit, or a strategic objective hex.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    Unit(&'a Unit),
    Hex(HexCoord),
}

impl<'a> Target<'a> {
    pub fn unit(&self) -> Option<&'a Unit> {
        match self {
            Target::Unit(unit) => Some(unit),
            Target::Hex(_) => None,
        }
    }

    pub fn id(&self) -> Option<UnitId> {
        self.unit().map(|u| u.id)
    }
}

/// Estimate of one weapon fired at one target. A pure value: computing it
/// never touches game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponFireInfo {
    pub shooter: UnitId,
    /// `None` for strategic hex targets.
    pub target: Option<UnitId>,
    /// Index into the shooter's weapon list; doubles as the identity used
    /// to forbid duplicates within a plan.
    pub weapon_index: usize,
    pub to_hit: i32,
    pub probability_to_hit: f64,
    pub heat: u32,
    pub expected_damage_on_hit: f64,
    pub expected_criticals: f64,
    pub kill_probability: f64,
    pub damage_direction: AttackDirection,
}

impl WeaponFireInfo {
    pub fn expected_damage(&self) -> f64 {
        self.probability_to_hit * self.expected_damage_on_hit
    }

    /// Estimate firing one weapon. `None` when the shot is impossible:
    /// out of range, out of arc, no line of sight, no ammo, shooter shut
    /// down. Impossibility is not an error.
    pub fn estimate(
        game: &Game,
        shooter: &Unit,
        shooter_state: &EntityState,
        weapon_index: usize,
        target: &Target<'_>,
        target_state: &EntityState,
    ) -> Option<Self> {
        let weapon = shooter.weapons.get(weapon_index)?;
        let to_hit = guess_to_hit(game, shooter, shooter_state, weapon, target, target_state)?;
        let probability_to_hit = probability_of_roll(to_hit);
        if probability_to_hit <= 0.0 {
            return None;
        }

        let toward_attacker = target_state
            .position
            .direction_to(&shooter_state.position);
        let damage_direction = attack_direction(target_state.facing, toward_attacker);

        let (criticals_on_hit, kill_on_hit) =
            expected_criticals_and_kill(weapon.damage, damage_direction, target);

        Some(Self {
            shooter: shooter.id,
            target: target.id(),
            weapon_index,
            to_hit,
            probability_to_hit,
            heat: weapon.heat,
            expected_damage_on_hit: weapon.damage,
            expected_criticals: probability_to_hit * criticals_on_hit,
            kill_probability: probability_to_hit * kill_on_hit,
            damage_direction,
        })
    }
}

/// Expected criticals and kill probability given the attack hits, from the
/// per-location/per-direction hit table. Kill only accrues through head or
/// center-torso breaches, and only against mek targets.
pub(crate) fn expected_criticals_and_kill(
    damage: f64,
    direction: AttackDirection,
    target: &Target<'_>,
) -> (f64, f64) {
    let Some(unit) = target.unit() else {
        return (0.0, 0.0);
    };
    if unit.kind != UnitKind::Mek {
        return (0.0, 0.0);
    }
    let mut criticals = 0.0;
    let mut kill = 0.0;
    for location in HitLocation::ALL {
        let index = location.index();
        let standing = unit.armor[index] + unit.internal[index];
        if damage < standing as f64 {
            continue;
        }
        let p_location = hit_location_probability(direction, location);
        criticals += p_location * EXPECTED_CRITICALS_PER_BREACH;
        if matches!(location, HitLocation::Head | HitLocation::CenterTorso) {
            kill += p_location;
        }
    }
    (criticals, kill)
}

/// Guessed to-hit number, or `None` for an impossible shot.
fn guess_to_hit(
    game: &Game,
    shooter: &Unit,
    shooter_state: &EntityState,
    weapon: &Weapon,
    target: &Target<'_>,
    target_state: &EntityState,
) -> Option<i32> {
    if shooter.shutdown || weapon.out_of_ammo() {
        return None;
    }
    let range = shooter_state.position.distance(&target_state.position);
    if range == 0 {
        return None;
    }

    let range_modifier = if range <= weapon.short_range {
        0
    } else if range <= weapon.medium_range {
        2
    } else if range <= weapon.long_range {
        4
    } else {
        return None;
    };

    if !in_arc(weapon, shooter_state, &target_state.position) {
        return None;
    }
    if !game
        .board
        .has_line_of_sight(&shooter_state.position, &target_state.position)
    {
        return None;
    }

    let attacker_movement = match shooter_state.movement {
        vanguard_core::enums::MovementKind::StandStill => 0,
        vanguard_core::enums::MovementKind::Walk => 1,
        vanguard_core::enums::MovementKind::Run => 2,
        vanguard_core::enums::MovementKind::Jump => 3,
    };

    let mut to_hit = shooter.gunnery
        + range_modifier
        + attacker_movement
        + target_movement_modifier(target_state.hexes_moved, target_state.jumping)
        + heat_to_hit_modifier(shooter_state.heat)
        + game
            .board
            .intervening_woods(&shooter_state.position, &target_state.position) as i32;

    if let Some(hex) = game.board.hex(&target_state.position) {
        to_hit += hex.woods as i32;
    }
    if shooter_state.prone {
        to_hit += 2;
    }
    if target_state.prone {
        to_hit += if range == 1 { -2 } else { 1 };
    }
    if target_state.immobile {
        to_hit -= 4;
    }

    Some(to_hit)
}

/// Whether the target hex lies inside the weapon's firing arc given the
/// shooter's facings. Forward arcs follow the secondary (twisted) facing;
/// rear arcs stay fixed to the body.
fn in_arc(weapon: &Weapon, shooter_state: &EntityState, target: &HexCoord) -> bool {
    let direction = shooter_state.position.direction_to(target);
    match weapon.arc {
        ArcKind::Turret => true,
        ArcKind::Forward => shooter_state.secondary_facing.rotation_distance(direction) <= 1,
        ArcKind::Rear => shooter_state.facing.opposite() == direction,
    }
}
