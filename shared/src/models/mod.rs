//! Persisted domain records
//!
//! These are the canonical row shapes as they appear in API responses.
//! Monetary fields serialize as JSON floats; database mapping lives in the
//! server crate.

mod menu;
mod order;
mod tenant;

pub use menu::{MenuItem, Modifier};
pub use order::{Order, OrderItem, OrderItemModifier, OrderState, Payment};
pub use tenant::{Branch, Tenant};
