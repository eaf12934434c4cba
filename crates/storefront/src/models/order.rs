//! Orders as read and updated by the admin console.

use chrono::{DateTime, Utc};
use duka_core::{OrderId, OrderStatus, RawPrice};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub id: OrderId,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default, alias = "totalAmount")]
    pub total: Option<RawPrice>,
    /// RFC 3339 timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// RFC 3339 timestamp of the last status change.
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub shipping_details: Option<ShippingDetails>,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

/// Where an order ships to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub street_address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// One purchased product inside an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Option<RawPrice>,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub image: Option<String>,
}

impl LineItem {
    /// Unit price times quantity; zero for an unusable price.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price
            .as_ref()
            .and_then(RawPrice::parse)
            .unwrap_or_default()
            * Decimal::from(self.quantity)
    }
}

impl Order {
    /// Parsed creation time.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.created_at.as_deref())
    }

    /// Parsed last-update time.
    #[must_use]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.updated_at.as_deref())
    }

    /// Stored total, if it parses.
    #[must_use]
    pub fn total(&self) -> Option<Decimal> {
        self.total.as_ref().and_then(RawPrice::parse)
    }

    /// Last eight characters of the id, as shown to staff.
    #[must_use]
    pub fn short_id(&self) -> &str {
        let id = self.id.as_str();
        let start = id
            .char_indices()
            .rev()
            .nth(7)
            .map_or(0, |(index, _)| index);
        id.get(start..).unwrap_or(id)
    }

    fn shipping_field(&self, field: fn(&ShippingDetails) -> Option<&String>) -> Option<&str> {
        self.shipping_details
            .as_ref()
            .and_then(field)
            .map(String::as_str)
    }

    /// Customer name from the shipping details.
    #[must_use]
    pub fn customer_name(&self) -> Option<&str> {
        self.shipping_field(|s| s.full_name.as_ref())
    }

    /// Customer email from the shipping details.
    #[must_use]
    pub fn customer_email(&self) -> Option<&str> {
        self.shipping_field(|s| s.email.as_ref())
    }

    /// Shipping city.
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.shipping_field(|s| s.city.as_ref())
    }
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|time| time.with_timezone(&Utc))
}

/// Sort newest first. Orders without a readable `createdAt` go last, in
/// their original order.
pub fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
}

/// Status dropdown selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    /// Parse a query value. Empty and `all` select everything.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            return Self::All;
        }
        Self::Only(
            OrderStatus::parse_selectable(value)
                .unwrap_or_else(|| OrderStatus::Other(value.to_string())),
        )
    }

    /// Query value for this filter.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }

    fn matches(&self, order: &Order) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => order.status == *status,
        }
    }
}

/// Admin console search and status filter.
#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
    search: String,
    pub status: StatusFilter,
}

impl OrderQuery {
    #[must_use]
    pub fn new(search: &str, status: StatusFilter) -> Self {
        Self {
            search: search.trim().to_lowercase(),
            status,
        }
    }

    /// Normalized search term.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Case-insensitive substring match on id, customer name or email, plus
    /// the status filter.
    #[must_use]
    pub fn matches(&self, order: &Order) -> bool {
        let contains = |value: Option<&str>| {
            value.is_some_and(|v| v.to_lowercase().contains(&self.search))
        };
        let searched = self.search.is_empty()
            || contains(Some(order.id.as_str()))
            || contains(order.customer_name())
            || contains(order.customer_email());

        searched && self.status.matches(order)
    }

    /// Orders passing the query, order preserved.
    #[must_use]
    pub fn apply<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        orders.iter().filter(|order| self.matches(order)).collect()
    }
}
