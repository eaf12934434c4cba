//! Admin order console: search, filter and update order status.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use duka_core::{CurrencyCode, OrderId, OrderStatus};
use serde::Deserialize;
use tracing::instrument;

use crate::db::OrderRepository;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireUser;
use crate::models::{Order, OrderQuery, StatusFilter};
use crate::state::AppState;

/// Console query string.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub status: String,
}

/// Status update form data.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusForm {
    pub status: String,
}

/// CSS modifier for a status badge.
#[must_use]
pub const fn badge_class(status: &OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "badge-pending",
        OrderStatus::Processing => "badge-processing",
        OrderStatus::Shipped => "badge-shipped",
        OrderStatus::Delivered => "badge-delivered",
        OrderStatus::Cancelled => "badge-cancelled",
        OrderStatus::Other(_) => "badge-other",
    }
}

/// A `<select>` option.
#[derive(Clone)]
pub struct StatusOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

fn status_options(current: &str, include_all: bool) -> Vec<StatusOption> {
    let all = include_all.then(|| StatusOption {
        value: "all".to_string(),
        label: "All Status".to_string(),
        selected: current == "all",
    });
    all.into_iter()
        .chain(OrderStatus::SELECTABLE.iter().map(|status| StatusOption {
            value: status.as_str().to_string(),
            label: status.label().to_string(),
            selected: status.as_str() == current,
        }))
        .collect()
}

/// Line item display data.
#[derive(Clone)]
pub struct LineItemView {
    pub name: String,
    pub image: Option<String>,
    pub quantity: u32,
    pub line_price: String,
}

/// Order card display data.
#[derive(Clone)]
pub struct OrderView {
    pub id: String,
    pub short_id: String,
    /// Status form target.
    pub action: String,
    pub status_label: String,
    pub badge_class: &'static str,
    pub created: String,
    pub updated: Option<String>,
    pub customer: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub street_address: String,
    pub region: String,
    pub country: String,
    pub total: String,
    pub items: Vec<LineItemView>,
    pub status_choices: Vec<StatusOption>,
}

fn or_na(value: Option<&String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| "N/A".to_string())
}

impl OrderView {
    fn new(order: &Order, currency: CurrencyCode) -> Self {
        let shipping = order.shipping_details.clone().unwrap_or_default();
        let region = [shipping.state.as_deref(), shipping.postal_code.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            id: order.id.to_string(),
            action: format!(
                "/admin/orders/{}/status",
                urlencoding::encode(order.id.as_str())
            ),
            short_id: order.short_id().to_string(),
            status_label: order.status.label().to_string(),
            badge_class: badge_class(&order.status),
            created: order
                .created_at()
                .map_or_else(|| "Unknown date".to_string(), filters::long_date),
            updated: order.updated_at().map(filters::long_date),
            customer: order
                .customer_name()
                .unwrap_or("Unknown Customer")
                .to_string(),
            email: or_na(shipping.email.as_ref()),
            phone: or_na(shipping.phone.as_ref()),
            city: order.city().unwrap_or("Unknown City").to_string(),
            street_address: or_na(shipping.street_address.as_ref()),
            region,
            country: or_na(shipping.country.as_ref()),
            total: filters::money(order.total().unwrap_or_default(), currency),
            items: order
                .items
                .iter()
                .map(|item| LineItemView {
                    name: item.name.clone(),
                    image: item.image.clone(),
                    quantity: item.quantity,
                    line_price: filters::money(item.line_total(), currency),
                })
                .collect(),
            status_choices: status_options(order.status.as_str(), false),
        }
    }
}

/// Order console template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/orders.html")]
pub struct OrdersTemplate {
    pub search: String,
    pub status_filters: Vec<StatusOption>,
    pub orders: Vec<OrderView>,
    pub total_count: usize,
}

/// List orders, newest first, filtered by search term and status.
#[instrument(skip(state, _user))]
pub async fn index(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Query(query): Query<OrdersQuery>,
) -> Result<OrdersTemplate> {
    let orders = OrderRepository::new(state.store())
        .list_newest_first()
        .await?;

    let status = StatusFilter::parse(&query.status);
    let order_query = OrderQuery::new(&query.q, status.clone());
    let currency = state.config().currency;

    Ok(OrdersTemplate {
        search: query.q.trim().to_string(),
        status_filters: status_options(status.as_str(), true),
        orders: order_query
            .apply(&orders)
            .into_iter()
            .map(|order| OrderView::new(order, currency))
            .collect(),
        total_count: orders.len(),
    })
}

/// Change an order's status.
#[instrument(skip(state, user))]
pub async fn update_status(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    Form(form): Form<UpdateStatusForm>,
) -> Result<impl IntoResponse> {
    let status = OrderStatus::parse_selectable(&form.status)
        .ok_or_else(|| AppError::BadRequest(format!("unknown status {:?}", form.status)))?;
    let id = OrderId::new(id);

    OrderRepository::new(state.store())
        .update_status(&id, &status)
        .await?;

    tracing::info!(order_id = %id, status = %status, admin = %user, "order status updated");
    add_breadcrumb(
        "orders",
        "Updated order status",
        Some(&[("order_id", id.as_str()), ("status", status.as_str())]),
    );

    Ok(Redirect::to("/admin/orders"))
}
