//! Utility modules: JSON persistence and logging.

pub mod logging;
pub mod persistence;
