//! Hypothetical unit states.

use vanguard_core::enums::MovementKind;
use vanguard_core::types::{Facing, HexCoord};
use vanguard_core::unit::Unit;
use vanguard_pathing::path::MovePath;

/// A snapshot of where a unit is (or would be) for one attack evaluation.
/// Immutable after construction except the secondary facing, which callers
/// overwrite to evaluate "what if I twist" without re-deriving the state.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityState {
    pub position: HexCoord,
    pub facing: Facing,
    pub secondary_facing: Facing,
    pub heat: i32,
    pub hexes_moved: u32,
    pub prone: bool,
    pub immobile: bool,
    pub jumping: bool,
    pub movement: MovementKind,
}

impl EntityState {
    /// Snapshot a unit's actual current state. `None` if it is off board.
    pub fn from_unit(unit: &Unit) -> Option<Self> {
        let position = unit.position?;
        Some(Self {
            position,
            facing: unit.facing,
            secondary_facing: unit.facing,
            heat: unit.heat,
            hexes_moved: 0,
            prone: unit.prone,
            immobile: unit.immobile,
            jumping: false,
            movement: MovementKind::StandStill,
        })
    }

    /// Snapshot the state a unit would be in after a candidate path.
    /// Heat is projected forward by the heat of the final movement step.
    pub fn from_path(unit: &Unit, path: &MovePath) -> Option<Self> {
        let position = path.final_coords()?;
        let facing = path.final_facing();
        Some(Self {
            position,
            facing,
            secondary_facing: facing,
            heat: unit.heat + path.last_step_heat() as i32,
            hexes_moved: path.hexes_moved(),
            prone: unit.prone,
            immobile: unit.immobile,
            jumping: path.is_jumping(),
            movement: path.kind,
        })
    }

    /// A phantom state for a strategic (non-unit) target hex.
    pub fn stationary_at(position: HexCoord) -> Self {
        Self {
            position,
            facing: Facing::new(0),
            secondary_facing: Facing::new(0),
            heat: 0,
            hexes_moved: 0,
            prone: false,
            immobile: true,
            jumping: false,
            movement: MovementKind::StandStill,
        }
    }

    /// The one permitted mutation: try a different torso/turret facing.
    pub fn set_secondary_facing(&mut self, facing: Facing) {
        self.secondary_facing = facing;
    }
}
