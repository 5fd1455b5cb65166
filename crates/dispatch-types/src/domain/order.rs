use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned order identifier, opaque to the client.
///
/// The dashboard never mints ids; it only echoes them back into endpoint
/// paths. The server emits numeric ids today but nothing here depends on
/// that, so deserialization accepts JSON numbers and strings alike and
/// normalizes to the string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for OrderId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = OrderId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an order id as a string or integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<OrderId, E> {
                Ok(OrderId(v.to_owned()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<OrderId, E> {
                Ok(OrderId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<OrderId, E> {
                Ok(OrderId(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// Lifecycle states as the server names them on the wire. `InProgress` is
/// spelled `"In-Progress"` in payloads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderStatus {
    Incoming,
    Accepted,
    #[serde(rename = "In-Progress")]
    InProgress,
    Completed,
    Cancelled,
}

/// A delivery order as observed via polling. The server owns identity and
/// status; the client only caches the latest view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    pub status: OrderStatus,
}

impl Order {
    /// Address line for display, with the fallback used when the server
    /// sent none.
    pub fn delivery_address_label(&self) -> &str {
        self.delivery_address.as_deref().unwrap_or("Not specified")
    }
}
