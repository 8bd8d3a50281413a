//! Decision weights and penalty constants.
//!
//! Behavioral biases (bravery, aggression, herding, self-preservation,
//! fall shame) live in `config::BehaviorSettings`; everything here is
//! engine policy that does not vary per bot personality.

// --- Fire control ---

/// Default utility weight per point of expected damage.
pub const DEFAULT_DAMAGE_UTILITY: f64 = 1.0;

/// Default utility weight per expected critical hit.
pub const DEFAULT_CRITICAL_UTILITY: f64 = 10.0;

/// Default utility weight on kill probability.
pub const DEFAULT_KILL_UTILITY: f64 = 50.0;

/// Default disutility per point of heat over the overheat threshold.
pub const DEFAULT_OVERHEAT_DISUTILITY: f64 = 5.0;

/// Heat the planner will allow above dissipation when budgeting a volley.
pub const HEAT_OVERFLOW_ALLOWANCE: i32 = 4;

// --- Path ranking ---

/// Rank for a non-VTOL aircraft ending its path at zero velocity.
pub const AERO_STALL_RANK: f64 = -1000.0;

/// Rank for an aircraft ending below minimum altitude.
pub const AERO_CRASH_RANK: f64 = -10000.0;

/// Rank for a path leaving via a board-edge return step.
pub const AERO_RETURN_RANK: f64 = -5.0;

/// VTOLs pay more for fleeing the board.
pub const VTOL_RETURN_RANK: f64 = -10.0;

/// Flat utility penalty when a path's piloting success probability is
/// exactly zero.
pub const IMPOSSIBLE_FALL_PENALTY: f64 = 1000.0;

/// Penalty per facing bucket beyond the first.
pub const FACING_PENALTY_PER_STEP: f64 = 50.0;

/// Sentinel facing penalty: surfaced immediately as the path's rank,
/// negated, with no further terms.
pub const FACING_ESCAPE_MOD: f64 = 10000.0;

/// Discount applied to an unmoved enemy's projected return fire.
pub const UNMOVED_FIRE_DISCOUNT: f64 = 0.5;
