//! Status enums for various entities.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Order status as written by the admin console.
///
/// Stored as lowercase strings. Values written by other tools are kept
/// verbatim in [`OrderStatus::Other`] so they survive a read-modify-write.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    #[serde(untagged)]
    Other(String),
}

impl OrderStatus {
    /// Statuses an admin can pick from.
    pub const SELECTABLE: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Stored string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Other(other) => other,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::Other(other) => other,
        }
    }

    /// Parse one of the selectable statuses. Unknown values yield `None`.
    #[must_use]
    pub fn parse_selectable(value: &str) -> Option<Self> {
        Self::SELECTABLE
            .into_iter()
            .find(|status| status.as_str() == value.trim())
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_known_status_round_trip() {
        let status: OrderStatus = serde_json::from_str("\"shipped\"").unwrap();
        assert_eq!(status, OrderStatus::Shipped);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"shipped\"");
    }

    #[test]
    fn test_unknown_status_preserved() {
        let status: OrderStatus = serde_json::from_str("\"on_hold\"").unwrap();
        assert_eq!(status, OrderStatus::Other("on_hold".to_string()));
        assert_eq!(status.as_str(), "on_hold");
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"on_hold\"");
    }

    #[test]
    fn test_parse_selectable() {
        assert_eq!(
            OrderStatus::parse_selectable("delivered"),
            Some(OrderStatus::Delivered)
        );
        assert_eq!(OrderStatus::parse_selectable("refunded"), None);
        assert_eq!(OrderStatus::parse_selectable("all"), None);
    }
}
