//! Common utilities for integration tests

pub mod test_helpers;

// Re-export commonly used items (each test binary uses a subset)
#[allow(unused_imports)]
pub use test_helpers::{
    assert_vectors_close,
    dirichlet_zero,
    max_error,
    relative_error,
    sine_mode,
    sine_mode_eigenvalue,
    uniform_scenario,
};
