//! Movement paths and the path-precomputation engine for VANGUARD.
//!
//! `path` and `reachable` are pure: candidate paths and reachable-area
//! sets computed from a read-only game snapshot. `precognition` is the
//! long-lived background worker that keeps those sets warm as the game
//! state changes.

pub mod path;
pub mod precognition;
pub mod reachable;

#[cfg(test)]
mod tests;
