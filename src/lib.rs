//! Snake - terminal snake game library.
//!
//! Exposes the game core, records and the screen state machine for testing
//! and for the binary.

pub mod app;
pub mod config;
pub mod core;
pub mod error;
pub mod input;
pub mod records;
pub mod ui;
pub mod utils;
