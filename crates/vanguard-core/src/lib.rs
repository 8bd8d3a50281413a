//! Core types and definitions for the VANGUARD decision engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! hex geometry, the read-only game-state model, dice and hit tables,
//! behavior configuration, change events, and tuning constants.
//! It has no dependency on the decision crates.

pub mod board;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod game;
pub mod rules;
pub mod types;
pub mod unit;
