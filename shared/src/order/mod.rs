//! Order domain: status state machine, order/channel enums, cart inputs

mod cart;
mod status;
mod types;

pub use cart::{CartLine, ChargeRates, OrderItemInput, OrderTotals};
pub use status::OrderStatus;
pub use types::{Channel, OrderType, PaymentMethod, PaymentStatus};
