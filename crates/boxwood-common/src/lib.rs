//! Common utilities for the Boxwood layout engine.
//!
//! This crate provides shared infrastructure used by the engine crates and the CLI:
//! - **Warning System** - deduplicated, colored terminal output for recoverable
//!   oddities found while styling or laying out a tree

pub mod warning;
