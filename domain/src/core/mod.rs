//! Core domain concepts shared across all pipelines

pub mod error;
pub mod model;
