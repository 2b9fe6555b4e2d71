pub use pinecone_core::{AutomataError, Result};
pub mod block {
    pub use pinecone_core::block::*;
}
pub mod complexity {
    pub use pinecone_core::complexity::*;
}
pub mod config {
    pub use pinecone_core::config::*;
}
pub mod margolus {
    pub use pinecone_core::margolus::*;
}
pub mod metrics {
    pub use pinecone_core::metrics::*;
}
pub mod quad_core {
    pub use pinecone_core::quad_core::*;
}
pub mod seeder {
    pub use pinecone_core::seeder::*;
}

pub mod state {
    pub use pinecone_data::*;
}
