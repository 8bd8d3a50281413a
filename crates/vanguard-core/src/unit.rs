//! Unit and weapon data.
//!
//! Units are plain data structs with read-only query helpers.
//! The decision crates never mutate them; construction happens in the
//! game-state owner (or the scenario generator in tests).

use serde::{Deserialize, Serialize};

use crate::enums::{ArcKind, BoardEdge, UnitKind};
use crate::types::{Facing, HexCoord, UnitId};

/// A weapon mount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    /// Heat generated when fired.
    pub heat: u32,
    /// Damage on a hit.
    pub damage: f64,
    /// Range brackets in hexes.
    pub short_range: u32,
    pub medium_range: u32,
    pub long_range: u32,
    pub arc: ArcKind,
    /// Remaining ammunition; `None` = energy weapon, never runs dry.
    pub ammo: Option<u32>,
}

impl Weapon {
    pub fn new(name: &str, heat: u32, damage: f64, short: u32, medium: u32, long: u32) -> Self {
        Self {
            name: name.to_string(),
            heat,
            damage,
            short_range: short,
            medium_range: medium,
            long_range: long,
            arc: ArcKind::Forward,
            ammo: None,
        }
    }

    pub fn out_of_ammo(&self) -> bool {
        self.ammo == Some(0)
    }
}

/// A combat unit as the game reports it. All fields are authoritative
/// game state; the engine treats them as read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    /// Owning player id.
    pub owner: u32,
    pub name: String,
    pub kind: UnitKind,
    /// `None` while undeployed or off board.
    pub position: Option<HexCoord>,
    pub facing: Facing,
    pub heat: i32,
    pub heat_capacity: i32,
    /// Gunnery skill (lower is better; base to-hit number).
    pub gunnery: i32,
    /// Piloting skill (lower is better; base piloting-roll number).
    pub piloting: i32,
    pub walk_mp: u32,
    pub run_mp: u32,
    pub jump_mp: u32,
    pub tonnage: f64,
    /// Armor points by `HitLocation::index()`.
    pub armor: [i32; 8],
    /// Internal structure by `HitLocation::index()`.
    pub internal: [i32; 8],
    pub weapons: Vec<Weapon>,
    /// Whether the chassis supports a torso/turret twist.
    pub can_twist: bool,
    pub prone: bool,
    pub immobile: bool,
    pub shutdown: bool,
    /// Has taken its movement this phase.
    pub moved: bool,
    /// Has finished its turn entirely.
    pub done: bool,
    pub destroyed: bool,
    /// [left, right] arm actuators destroyed.
    pub arm_destroyed: [bool; 2],
    /// [left, right] leg/hip actuators destroyed.
    pub leg_destroyed: [bool; 2],
    pub home_edge: Option<BoardEdge>,
    /// Crippled units want to withdraw toward their home edge.
    pub crippled: bool,
    /// Aerospace velocity in hexes per turn.
    pub velocity: u32,
    /// Aerospace altitude band.
    pub altitude: i32,
}

impl Unit {
    pub fn new(id: u32, owner: u32, name: &str, kind: UnitKind) -> Self {
        Self {
            id: UnitId(id),
            owner,
            name: name.to_string(),
            kind,
            position: None,
            facing: Facing::new(0),
            heat: 0,
            heat_capacity: 10,
            gunnery: 4,
            piloting: 5,
            walk_mp: 4,
            run_mp: 6,
            jump_mp: 0,
            tonnage: 50.0,
            armor: [8; 8],
            internal: [4; 8],
            weapons: Vec::new(),
            can_twist: kind == UnitKind::Mek,
            prone: false,
            immobile: false,
            shutdown: false,
            moved: false,
            done: false,
            destroyed: false,
            arm_destroyed: [false; 2],
            leg_destroyed: [false; 2],
            home_edge: None,
            crippled: false,
            velocity: 0,
            altitude: 0,
        }
    }

    pub fn is_deployed(&self) -> bool {
        self.position.is_some() && !self.destroyed
    }

    /// Whether the unit may still be selected to move this turn.
    pub fn is_selectable(&self) -> bool {
        self.is_deployed() && !self.done && !self.shutdown
    }

    /// Largest movement budget available this turn.
    pub fn max_mp(&self) -> u32 {
        self.run_mp.max(self.jump_mp)
    }

    /// Total damage this unit can put out at the given range, summing every
    /// weapon still in range and supplied.
    pub fn max_damage_at(&self, range: u32) -> f64 {
        self.weapons
            .iter()
            .filter(|w| !w.out_of_ammo() && w.long_range >= range)
            .map(|w| w.damage)
            .sum()
    }

    pub fn kick_damage(&self) -> f64 {
        self.tonnage / 5.0
    }

    /// Punch damage across the working arms.
    pub fn punch_damage(&self) -> f64 {
        let arms = self.arm_destroyed.iter().filter(|d| !**d).count() as f64;
        self.tonnage / 10.0 * arms
    }
}
