//! Graph preparation pipeline (C4): traversability filter,
//! connected-component restriction, frontier extraction, optional border
//! expansion, anchor reconnection, and frontier clustering.

mod error;
mod frontier;
mod pipeline;
mod spatial;

pub use error::PrepareError;
pub use frontier::FrontierCluster;
pub use pipeline::{prepare, PreparationResult};
