//! Shared domain types for the Oryx POS service
//!
//! This crate holds everything both the server and future clients need to
//! agree on:
//!
//! - **Errors** (`error`): unified error codes, `AppError`, and the
//!   `ApiResponse` envelope used by every endpoint
//! - **Money** (`money`): fixed-point currency helpers (3 decimal places)
//! - **Orders** (`order`): order status state machine, order/cart enums,
//!   cart input types
//! - **Models** (`models`): persisted records (tenants, branches, menu,
//!   orders and their children)

pub mod error;
pub mod models;
pub mod money;
pub mod order;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use order::{Channel, OrderStatus, OrderType, PaymentMethod, PaymentStatus};
