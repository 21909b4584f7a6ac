//! Typed argument modules for the external tools fwpack drives.
//!
//! This module contains structs that implement `ToolArgs` for each external
//! tool. Each struct maps Rust fields to the exact CLI flags and environment
//! variables expected by the corresponding program.

pub mod companion;
pub mod git;
pub mod pio;
