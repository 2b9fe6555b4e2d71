//! # Pinecone Core
//!
//! Two cellular-automaton engines driven step by step by an external caller:
//!
//! - a **reversible Margolus block automaton** seeded once with golden-angle
//!   spiral geometry, whose steps can be undone exactly without history
//! - a **quad-redundant Game-of-Life automaton** that injects random bit flips
//!   into four cores and repairs them by per-cell majority vote
//!
//! Plus the read-only complexity analyzer, TOML configuration, error types and
//! logging setup shared by the tools.
//!
//! ## Architecture
//!
//! - **Owned grids**: every engine exclusively owns its grids and double-buffers
//!   each step, swapping the new grid in only once it is complete
//! - **Parallel processing**: Rayon evolves the four redundant cores and the
//!   Margolus block bands concurrently; voting waits for all four cores
//! - **Deterministic simulation**: seeding uses no randomness and fault
//!   injection draws from an owned, seedable ChaCha RNG
//!
//! ## Example
//!
//! ```
//! use pinecone_core::margolus::MargolusEngine;
//!
//! let mut engine = MargolusEngine::seeded(50, 89).unwrap();
//! let original = engine.snapshot();
//!
//! for _ in 0..6 {
//!     engine.step(false);
//! }
//! for _ in 0..6 {
//!     engine.step(true);
//! }
//! assert_eq!(engine.snapshot(), original);
//! ```

/// Reversible 2x2 block rule and its lookup table
pub mod block;
/// Entropy, spiral counts and pattern energy
pub mod complexity;
/// Configuration management for engine parameters
pub mod config;
/// Error types and result alias
pub mod error;
/// Reversible Margolus block automaton
pub mod margolus;
/// Step metrics collection and logging
pub mod metrics;
/// Quad-redundant fault-tolerant automaton
pub mod quad_core;
/// Golden-angle spiral seeding
pub mod seeder;

pub use complexity::ComplexityAnalyzer;
pub use config::AutomataConfig;
pub use error::{AutomataError, Result};
pub use margolus::{MargolusEngine, MargolusSnapshot};
pub use metrics::{init_logging, Metrics};
pub use pinecone_data::{Boundary, Consensus, Grid, PartitionOffset, ResetPattern};
pub use quad_core::{majority_vote, ConsensusGrid, QuadCoreEngine, Vote};
pub use seeder::GeometrySeeder;
