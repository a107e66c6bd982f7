//! Repo Provisioner CLI library exports for integration testing.
//!
//! This module exposes the argument model and the provision command so they can be
//! driven without spawning the binary.

pub mod commands;
pub mod config;
pub mod errors;
