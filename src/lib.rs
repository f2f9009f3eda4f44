//! Leadboard - A command-line sales pipeline tracker
//!
//! This library provides the core functionality for Leadboard, including:
//! - Database operations and migrations
//! - Data models for leads and pipeline stages
//! - Store layer for lead persistence (SQLite and in-memory backends)
//! - The pipeline board: stage grouping, drag state, and optimistic
//!   stage transitions with rollback
//! - CLI command parsing and execution
//! - Date/time and fuzzy-matching utilities
//!
//! # Example
//!
//! ```no_run
//! use leadboard::cli::run;
//!
//! fn main() {
//!     if let Err(e) = run() {
//!         eprintln!("Error: {}", e);
//!         std::process::exit(1);
//!     }
//! }
//! ```

pub mod db;
pub mod models;
pub mod store;
pub mod board;
pub mod cli;
pub mod utils;
