//! Order status state machine
//!
//! The lifecycle is a fixed directed graph. Every status change must follow
//! an edge of this graph; everything else is rejected. `completed` and
//! `cancelled` are terminal.
//!
//! ```text
//! pending ──► accepted ──► preparing ──► ready ──► dispatched ──► delivered ──► completed
//!    │            │            │           │  │         │
//!    └──► preparing (skip)     │           │  └──► completed (pickup)
//!    │            │            │           │
//!    └────────────┴────────────┴───────────┴──► cancelled
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order received, not yet acknowledged by the branch
    Pending,
    /// Branch acknowledged the order
    Accepted,
    /// Kitchen is working on the order
    Preparing,
    /// Food is ready for pickup or dispatch
    Ready,
    /// Out for delivery
    Dispatched,
    /// Handed to the customer by the courier
    Delivered,
    /// Order fulfilled (terminal)
    Completed,
    /// Order cancelled (terminal)
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in lifecycle order
    pub const ALL: [OrderStatus; 8] = [
        OrderStatus::Pending,
        OrderStatus::Accepted,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Dispatched,
        OrderStatus::Delivered,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// Statuses reachable from this one in a single transition
    pub const fn allowed_next(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[
                OrderStatus::Accepted,
                OrderStatus::Preparing,
                OrderStatus::Cancelled,
            ],
            OrderStatus::Accepted => &[OrderStatus::Preparing, OrderStatus::Cancelled],
            OrderStatus::Preparing => &[OrderStatus::Ready, OrderStatus::Cancelled],
            OrderStatus::Ready => &[
                OrderStatus::Dispatched,
                OrderStatus::Completed,
                OrderStatus::Cancelled,
            ],
            OrderStatus::Dispatched => &[OrderStatus::Delivered, OrderStatus::Cancelled],
            OrderStatus::Delivered => &[OrderStatus::Completed],
            OrderStatus::Completed | OrderStatus::Cancelled => &[],
        }
    }

    /// Whether `target` is a valid next status
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        self.allowed_next().contains(&target)
    }

    /// Terminal statuses admit no further transitions
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Canonical lowercase string form (wire and database representation)
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Dispatched => "dispatched",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "accepted" => Ok(OrderStatus::Accepted),
            "preparing" => Ok(OrderStatus::Preparing),
            "ready" => Ok(OrderStatus::Ready),
            "dispatched" => Ok(OrderStatus::Dispatched),
            "delivered" => Ok(OrderStatus::Delivered),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(format!("unknown order status: {s:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_transition_table() {
        use OrderStatus::*;

        let expected: [(OrderStatus, &[OrderStatus]); 8] = [
            (Pending, &[Accepted, Preparing, Cancelled]),
            (Accepted, &[Preparing, Cancelled]),
            (Preparing, &[Ready, Cancelled]),
            (Ready, &[Dispatched, Completed, Cancelled]),
            (Dispatched, &[Delivered, Cancelled]),
            (Delivered, &[Completed]),
            (Completed, &[]),
            (Cancelled, &[]),
        ];

        for (from, allowed) in expected {
            assert_eq!(from.allowed_next(), allowed, "from {from}");
            for to in OrderStatus::ALL {
                assert_eq!(
                    from.can_transition_to(to),
                    allowed.contains(&to),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());

        for status in [
            OrderStatus::Pending,
            OrderStatus::Accepted,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Dispatched,
            OrderStatus::Delivered,
        ] {
            assert!(!status.is_terminal(), "{status} should not be terminal");
            assert!(!status.allowed_next().is_empty());
        }
    }

    #[test]
    fn test_skip_accepted_is_allowed() {
        // POS flows often go straight from pending to preparing
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Preparing));
    }

    #[test]
    fn test_no_backwards_edges() {
        assert!(!OrderStatus::Preparing.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Ready.can_transition_to(OrderStatus::Preparing));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Dispatched));
    }

    #[test]
    fn test_string_roundtrip() {
        for status in OrderStatus::ALL {
            let parsed: OrderStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("unknown".parse::<OrderStatus>().is_err());
        assert!("Pending".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&OrderStatus::Preparing).unwrap();
        assert_eq!(json, "\"preparing\"");

        let status: OrderStatus = serde_json::from_str("\"dispatched\"").unwrap();
        assert_eq!(status, OrderStatus::Dispatched);
    }
}
