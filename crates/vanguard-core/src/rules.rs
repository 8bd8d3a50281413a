//! Combat-resolution primitives consumed from the rules engine.
//!
//! The engine only *estimates* outcomes; nothing here resolves real damage.
//! The 2d6 odds table and the per-direction hit-location table are the two
//! lookups every attack estimate is built from.

use crate::enums::{AttackDirection, HitLocation};
use crate::types::Facing;

/// Expected number of critical hits given the struck location's armor and
/// structure are breached by the hit.
pub const EXPECTED_CRITICALS_PER_BREACH: f64 = 0.611;

/// Probability of rolling `target` or higher on 2d6.
pub fn probability_of_roll(target: i32) -> f64 {
    // Counts of outcomes >= target, out of 36, for targets 2..=12.
    const AT_LEAST: [f64; 11] = [
        36.0, 35.0, 33.0, 30.0, 26.0, 21.0, 15.0, 10.0, 6.0, 3.0, 1.0,
    ];
    if target <= 2 {
        1.0
    } else if target > 12 {
        0.0
    } else {
        AT_LEAST[(target - 2) as usize] / 36.0
    }
}

/// Probability that a hit from the given direction strikes the given
/// location, per the standard 2d6 hit-location table. Each direction's
/// probabilities sum to 1.
pub fn hit_location_probability(direction: AttackDirection, location: HitLocation) -> f64 {
    use AttackDirection::*;
    use HitLocation::*;
    let thirty_sixths = match direction {
        // 2 CT, 3-4 RA, 5 RL, 6 RT, 7 CT, 8 LT, 9 LL, 10-11 LA, 12 Head
        Front | Rear => match location {
            Head => 1.0,
            CenterTorso => 7.0,
            RightArm => 5.0,
            RightLeg => 4.0,
            RightTorso => 5.0,
            LeftTorso => 5.0,
            LeftLeg => 4.0,
            LeftArm => 5.0,
        },
        // 2 LT, 3 LL, 4-5 LA, 6 LL, 7 LT, 8 CT, 9 RT, 10 RA, 11 RL, 12 Head
        Left => match location {
            Head => 1.0,
            LeftTorso => 7.0,
            LeftLeg => 7.0,
            LeftArm => 7.0,
            CenterTorso => 5.0,
            RightTorso => 4.0,
            RightArm => 3.0,
            RightLeg => 2.0,
        },
        Right => match location {
            Head => 1.0,
            RightTorso => 7.0,
            RightLeg => 7.0,
            RightArm => 7.0,
            CenterTorso => 5.0,
            LeftTorso => 4.0,
            LeftArm => 3.0,
            LeftLeg => 2.0,
        },
    };
    thirty_sixths / 36.0
}

/// Which side of a target an attack arrives on, from the target's facing
/// and the hexside direction from the target toward the attacker.
pub fn attack_direction(target_facing: Facing, toward_attacker: Facing) -> AttackDirection {
    match (6 + toward_attacker.value() - target_facing.value()) % 6 {
        0 => AttackDirection::Front,
        1 | 2 => AttackDirection::Right,
        3 => AttackDirection::Rear,
        _ => AttackDirection::Left,
    }
}

/// To-hit penalty from the attacker's own heat.
pub fn heat_to_hit_modifier(heat: i32) -> i32 {
    match heat {
        h if h >= 24 => 4,
        h if h >= 17 => 3,
        h if h >= 13 => 2,
        h if h >= 8 => 1,
        _ => 0,
    }
}

/// To-hit modifier from target movement: hexes moved this turn plus a
/// jump penalty.
pub fn target_movement_modifier(hexes_moved: u32, jumping: bool) -> i32 {
    let base = match hexes_moved {
        0..=2 => 0,
        3..=4 => 1,
        5..=6 => 2,
        7..=9 => 3,
        _ => 4,
    };
    base + i32::from(jumping)
}
