//! Movement-path ranking for VANGUARD.
//!
//! Assigns a scalar utility to each candidate movement path by weighing
//! expected offense against expected return fire, shaded by the bot's
//! behavioral biases. Ranking is a pure function of the game snapshot and
//! the path; the only per-turn state is a small damage cache populated by
//! `PathRanker::init_unit_turn`.

pub mod ranked;
pub mod ranker;

#[cfg(test)]
mod tests;
