//! The VANGUARD decision facade.
//!
//! `Brain` wires the precomputation engine, fire control, and the path
//! ranker together behind the small API the turn-submission layer calls.
//! `scenario` builds seeded random battlefields for tests and demos.

pub mod brain;
pub mod scenario;

#[cfg(test)]
mod tests;
