pub mod macros;

use pinecone_lib::model::margolus::MargolusEngine;
use pinecone_lib::model::quad_core::QuadCoreEngine;
use pinecone_lib::model::state::{Boundary, Grid, ResetPattern};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Grid of `size` with every cell drawn from a seeded stream.
#[allow(dead_code)]
pub fn random_grid(size: usize, seed: u64) -> Grid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let cells = (0..size * size).map(|_| u8::from(rng.gen::<bool>())).collect();
    Grid::from_cells(size, cells).expect("cell count matches size")
}

#[allow(dead_code)]
pub struct MargolusBuilder {
    grid_size: usize,
    num_scales: usize,
    grid: Option<Grid>,
    reverse_mode: bool,
}

#[allow(dead_code)]
impl MargolusBuilder {
    pub fn new() -> Self {
        Self {
            grid_size: 50,
            num_scales: 89,
            grid: None,
            reverse_mode: false,
        }
    }

    pub fn with_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_scales(mut self, num_scales: usize) -> Self {
        self.num_scales = num_scales;
        self
    }

    /// Loads explicit content instead of the spiral seed.
    pub fn with_grid(mut self, grid: Grid) -> Self {
        self.grid_size = grid.size();
        self.grid = Some(grid);
        self
    }

    pub fn reversed(mut self) -> Self {
        self.reverse_mode = true;
        self
    }

    pub fn build(self) -> MargolusEngine {
        let mut engine = match self.grid {
            Some(grid) => {
                let mut engine = MargolusEngine::new(self.grid_size, self.num_scales)
                    .expect("valid grid size");
                engine.load_grid(grid).expect("grid matches engine size");
                engine
            }
            None => MargolusEngine::seeded(self.grid_size, self.num_scales)
                .expect("valid grid size"),
        };
        engine.set_reverse_mode(self.reverse_mode);
        engine
    }
}

#[allow(dead_code)]
pub struct QuadCoreBuilder {
    grid_size: usize,
    fault_rate: f64,
    seed: u64,
    boundary: Boundary,
    pattern: ResetPattern,
}

#[allow(dead_code)]
impl QuadCoreBuilder {
    pub fn new() -> Self {
        Self {
            grid_size: 30,
            fault_rate: 0.0,
            seed: 42,
            boundary: Boundary::FrozenEdge,
            pattern: ResetPattern::Random,
        }
    }

    pub fn with_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_fault_rate(mut self, rate: f64) -> Self {
        self.fault_rate = rate;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_pattern(mut self, pattern: ResetPattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn build(self) -> QuadCoreEngine {
        let mut engine = QuadCoreEngine::new(self.grid_size, self.fault_rate, self.seed)
            .expect("valid quad-core parameters")
            .with_boundary(self.boundary);
        engine.reset(self.pattern);
        engine
    }
}
