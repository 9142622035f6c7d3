//! Common utilities for integration tests

pub mod fixtures;
pub mod test_helpers;

// Re-export commonly used items
pub use fixtures::{RunFixture, write_run};
pub use test_helpers::{
    constant_run,
    run_with_tensor_xx,
    series_for,
    time_index,
};
