//! Configuration for building automata engines.
//!
//! The engines themselves only take plain values. These structures let tools
//! keep those values in a `pinecone.toml` file and build validated engines
//! from it.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. TOML file (overrides defaults, missing keys fall back)
//!
//! ## Example `pinecone.toml`
//!
//! ```toml
//! [margolus]
//! grid_size = 50
//! num_scales = 89
//!
//! [quad_core]
//! grid_size = 30
//! fault_injection_rate = 0.01
//! seed = 42
//! boundary = "Toroidal"
//! initial_pattern = "Glider"
//! ```

use crate::error::{check_fault_rate, check_grid_size, AutomataError, Result};
use crate::margolus::MargolusEngine;
use crate::quad_core::QuadCoreEngine;
use pinecone_data::{Boundary, ResetPattern};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Reversible spiral automaton parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MargolusConfig {
    pub grid_size: usize,
    pub num_scales: usize,
    pub reverse_mode: bool,
}

impl Default for MargolusConfig {
    fn default() -> Self {
        Self {
            grid_size: 50,
            num_scales: 89,
            reverse_mode: false,
        }
    }
}

/// Fault-tolerant automaton parameters.
///
/// Without a `seed` the fault-injection stream is seeded from OS entropy and
/// runs are not reproducible.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct QuadCoreConfig {
    pub grid_size: usize,
    pub fault_injection_rate: f64,
    pub seed: Option<u64>,
    pub boundary: Boundary,
    pub initial_pattern: ResetPattern,
}

impl Default for QuadCoreConfig {
    fn default() -> Self {
        Self {
            grid_size: 30,
            fault_injection_rate: 0.01,
            seed: None,
            boundary: Boundary::FrozenEdge,
            initial_pattern: ResetPattern::Random,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AutomataConfig {
    pub margolus: MargolusConfig,
    pub quad_core: QuadCoreConfig,
}

impl AutomataConfig {
    /// Reads and validates a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AutomataError::from(e).with_context(path.display().to_string()))?;
        Self::from_toml_str(&content)
            .map_err(|e| e.with_context(format!("loading {}", path.display())))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        check_grid_size(self.margolus.grid_size)
            .map_err(|e| e.with_context("[margolus] grid_size"))?;
        if u32::try_from(self.margolus.num_scales).is_err() {
            return Err(AutomataError::validation(format!(
                "[margolus] num_scales {} exceeds the floret age range",
                self.margolus.num_scales
            )));
        }
        check_grid_size(self.quad_core.grid_size)
            .map_err(|e| e.with_context("[quad_core] grid_size"))?;
        check_fault_rate(self.quad_core.fault_injection_rate)
            .map_err(|e| e.with_context("[quad_core] fault_injection_rate"))?;
        Ok(())
    }

    /// Seeded Margolus engine with the configured reverse mode.
    pub fn build_margolus(&self) -> Result<MargolusEngine> {
        let cfg = &self.margolus;
        let mut engine = MargolusEngine::seeded(cfg.grid_size, cfg.num_scales)?;
        engine.set_reverse_mode(cfg.reverse_mode);
        Ok(engine)
    }

    /// Quad-core engine reset to the configured initial pattern.
    pub fn build_quad_core(&self) -> Result<QuadCoreEngine> {
        let cfg = &self.quad_core;
        let rng = match cfg.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let mut engine = QuadCoreEngine::with_rng(cfg.grid_size, cfg.fault_injection_rate, rng)?
            .with_boundary(cfg.boundary);
        engine.reset(cfg.initial_pattern);
        Ok(engine)
    }
}
