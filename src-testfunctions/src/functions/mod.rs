//! Test function implementations organized by category
//!
//! - `unimodal`: single-optimum functions (sphere, Schwefel 1.2/2.21/2.22, Rosenbrock, step)
//! - `multimodal`: many local minima (Schwefel 2.26, Rastrigin)

pub mod multimodal;
pub mod unimodal;

// Re-export all functions for easy access
pub use multimodal::*;
pub use unimodal::*;
