//! Rules engine for a single session of Don't Mess with Cthulhu.

pub mod error;
pub mod game;
pub mod stats;
