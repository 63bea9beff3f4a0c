//! oryx-server — restaurant order service
//!
//! HTTP service around three pieces of order machinery:
//! - a pure totals calculator (3-decimal fixed point, half-up rounding)
//! - an order lifecycle state machine with append-only history
//! - a per-branch daily order number generator
//!
//! Backed by SQLite (WAL) through sqlx; every order mutation is a single
//! transaction.

pub mod api;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

pub use crate::core::{AppState, Config, Server};
