//! Order classification enums shared across the wire and the database

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fulfilment mode of the order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Counter service, eaten in
    #[default]
    Qsr,
    /// Packed for pickup
    Takeaway,
    /// Delivered to the customer
    Delivery,
}

/// Where the order originated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// In-store POS terminal
    #[default]
    Pos,
    Website,
    Mobile,
    Talabat,
    Deliveroo,
    Careem,
}

/// Settlement state of the order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

/// How the customer pays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Online,
    Wallet,
}

impl PaymentMethod {
    /// Cash settles at handover; everything else is captured up front
    pub const fn initial_payment_status(&self) -> PaymentStatus {
        match self {
            PaymentMethod::Cash => PaymentStatus::Pending,
            PaymentMethod::Card | PaymentMethod::Online | PaymentMethod::Wallet => {
                PaymentStatus::Paid
            }
        }
    }
}

macro_rules! string_repr {
    ($ty:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        impl $ty {
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $s),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok($ty::$variant),)+
                    _ => Err(format!(concat!("unknown ", stringify!($ty), ": {:?}"), s)),
                }
            }
        }
    };
}

string_repr!(OrderType {
    Qsr => "qsr",
    Takeaway => "takeaway",
    Delivery => "delivery",
});

string_repr!(Channel {
    Pos => "pos",
    Website => "website",
    Mobile => "mobile",
    Talabat => "talabat",
    Deliveroo => "deliveroo",
    Careem => "careem",
});

string_repr!(PaymentStatus {
    Pending => "pending",
    Paid => "paid",
});

string_repr!(PaymentMethod {
    Cash => "cash",
    Card => "card",
    Online => "online",
    Wallet => "wallet",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_payment_status() {
        assert_eq!(
            PaymentMethod::Cash.initial_payment_status(),
            PaymentStatus::Pending
        );
        assert_eq!(
            PaymentMethod::Card.initial_payment_status(),
            PaymentStatus::Paid
        );
        assert_eq!(
            PaymentMethod::Online.initial_payment_status(),
            PaymentStatus::Paid
        );
        assert_eq!(
            PaymentMethod::Wallet.initial_payment_status(),
            PaymentStatus::Paid
        );
    }

    #[test]
    fn test_string_roundtrips() {
        for t in [OrderType::Qsr, OrderType::Takeaway, OrderType::Delivery] {
            assert_eq!(t.as_str().parse::<OrderType>().unwrap(), t);
        }
        for c in [
            Channel::Pos,
            Channel::Website,
            Channel::Mobile,
            Channel::Talabat,
            Channel::Deliveroo,
            Channel::Careem,
        ] {
            assert_eq!(c.as_str().parse::<Channel>().unwrap(), c);
        }
        for m in [
            PaymentMethod::Cash,
            PaymentMethod::Card,
            PaymentMethod::Online,
            PaymentMethod::Wallet,
        ] {
            assert_eq!(m.as_str().parse::<PaymentMethod>().unwrap(), m);
        }
    }

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&Channel::Talabat).unwrap(),
            "\"talabat\""
        );
        assert_eq!(serde_json::to_string(&OrderType::Qsr).unwrap(), "\"qsr\"");
        let m: PaymentMethod = serde_json::from_str("\"wallet\"").unwrap();
        assert_eq!(m, PaymentMethod::Wallet);
    }

    #[test]
    fn test_unknown_strings_rejected() {
        assert!("drive_thru".parse::<OrderType>().is_err());
        assert!("ubereats".parse::<Channel>().is_err());
        assert!("refunded".parse::<PaymentStatus>().is_err());
    }
}
