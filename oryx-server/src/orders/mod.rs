//! Order domain logic: totals calculation, order numbering, lifecycle

pub mod calculator;
pub mod number;
pub mod service;
