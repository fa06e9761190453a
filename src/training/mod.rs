//! Training infrastructure: episode driver against the random opponent,
//! rolling metrics, and the trainer loop.

pub mod episode;
pub mod metrics;
pub mod trainer;
