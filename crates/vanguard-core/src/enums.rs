//! Enumeration types used throughout the decision engine.

use serde::{Deserialize, Serialize};

/// Turn phase of the underlying game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Deployment,
    Movement,
    Firing,
    Physical,
    End,
}

/// How a unit spends its movement for the turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementKind {
    #[default]
    StandStill,
    Walk,
    Run,
    Jump,
}

/// Broad unit chassis category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    #[default]
    Mek,
    Vehicle,
    Vtol,
    Infantry,
    Aerospace,
}

impl UnitKind {
    /// Aircraft skip the ground-bias ranking terms.
    pub fn is_airborne(self) -> bool {
        matches!(self, UnitKind::Vtol | UnitKind::Aerospace)
    }
}

/// Firing arc of a weapon mount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArcKind {
    /// Forward three hexsides, follows torso/turret twist.
    #[default]
    Forward,
    /// Single rear hexside, fixed to body facing.
    Rear,
    /// Full rotation, always in arc.
    Turret,
}

/// Mek hit locations. Non-mek targets use none of these; their damage
/// is tracked as a single pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HitLocation {
    Head,
    CenterTorso,
    LeftTorso,
    RightTorso,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl HitLocation {
    pub const ALL: [HitLocation; 8] = [
        HitLocation::Head,
        HitLocation::CenterTorso,
        HitLocation::LeftTorso,
        HitLocation::RightTorso,
        HitLocation::LeftArm,
        HitLocation::RightArm,
        HitLocation::LeftLeg,
        HitLocation::RightLeg,
    ];

    pub fn index(self) -> usize {
        match self {
            HitLocation::Head => 0,
            HitLocation::CenterTorso => 1,
            HitLocation::LeftTorso => 2,
            HitLocation::RightTorso => 3,
            HitLocation::LeftArm => 4,
            HitLocation::RightArm => 5,
            HitLocation::LeftLeg => 6,
            HitLocation::RightLeg => 7,
        }
    }
}

/// Which side of the target an attack comes in on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackDirection {
    #[default]
    Front,
    Left,
    Right,
    Rear,
}

/// Kind of physical attack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhysicalKind {
    #[default]
    Kick,
    Punch,
}

/// Board edge, for retreat distance calculations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardEdge {
    #[default]
    North,
    South,
    East,
    West,
}
