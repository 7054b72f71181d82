//! Blacksquid CLI library.
//!
//! The modules are public so the integration tests can reach them.

pub mod cli;
pub mod commands;
pub mod common;
