//! Tests for the game engine, grouped by the part of the rules they exercise.

#![cfg(test)]

pub mod initialization;
pub mod invariants;
pub mod state_transitions;
