//! Fire control for VANGUARD.
//!
//! Estimates weapon and physical attacks between hypothetical unit states
//! and plans the best volley under a heat budget. Everything here is a
//! pure estimate: no game state is ever mutated, and an impossible attack
//! is an absent estimate, never an error.

pub mod physical;
pub mod plan;
pub mod planner;
pub mod shot;
pub mod state;
