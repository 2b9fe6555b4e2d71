//! Core data structures shared by the automata engines.

pub mod grid;
pub mod spiral;
pub mod stats;
