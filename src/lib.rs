//! hallseat Library
//!
//! This library provides the core of the exam hall seating planner: roster
//! parsing, the seat allocation engine, plan exporters, configuration, and
//! the CLI and web front ends built on them.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod export;
pub mod models;
pub mod parser;
pub mod services;

#[cfg(feature = "web")]
pub mod web;

pub use engine::{allocate, allocate_with_rng};
pub use error::AllocationError;
pub use models::{AllocationResult, FillMode, LayoutConfig, OrderingStrategy, Person};
