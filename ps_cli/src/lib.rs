//! Internal modules for the tournament terminal frontend.
//!
//! This library provides command parsing, configuration, text rendering and
//! the interactive session used by the ps_cli binary.

pub mod commands;
pub mod config;
pub mod render;
pub mod session;
