//! Home page: search, category pills and one capped rail per category.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use duka_core::CurrencyCode;
use duka_core::catalog::{Browse, CappedRail, Catalog, DisplayItem};
use serde::Deserialize;
use tracing::instrument;

use crate::db::CatalogRepository;
use crate::filters;
use crate::middleware::OptionalUser;
use crate::navigation::{NavItem, nav_items};
use crate::state::AppState;

/// Home page query string.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    /// Free-text search over item names.
    #[serde(default)]
    pub q: String,
    /// Selected category id. Empty means all categories.
    #[serde(default)]
    pub category: Option<String>,
}

impl HomeQuery {
    fn selected_category(&self) -> Option<&str> {
        self.category.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

// =============================================================================
// Views
// =============================================================================

/// A category filter pill.
#[derive(Clone)]
pub struct CategoryPill {
    /// Category id, empty for "All".
    pub id: String,
    pub name: String,
    pub active: bool,
}

/// One product or group card in a rail.
#[derive(Clone)]
pub struct CardView {
    pub key: String,
    pub name: String,
    pub image: Option<String>,
    pub href: String,
    pub price: Option<String>,
    pub old_price: Option<String>,
    /// Set for group cards.
    pub variant_count: Option<usize>,
}

impl CardView {
    fn from_item(item: &DisplayItem, currency: CurrencyCode) -> Self {
        match item {
            DisplayItem::Standalone(product) => Self {
                key: product.id.to_string(),
                name: product.name.clone(),
                image: product.image.clone(),
                href: format!("/product/{}", urlencoding::encode(product.id.as_str())),
                price: product
                    .parsed_price()
                    .map(|amount| filters::money(amount, currency)),
                old_price: product
                    .parsed_old_price()
                    .map(|amount| filters::money(amount, currency)),
                variant_count: None,
            },
            DisplayItem::Group(group) => Self {
                key: group.group_id.to_string(),
                name: group.name.clone(),
                image: group.image.clone(),
                href: format!("/group/{}", urlencoding::encode(group.group_id.as_str())),
                price: group
                    .min_price
                    .map(|amount| format!("From {}", filters::money(amount, currency))),
                old_price: None,
                variant_count: Some(group.variant_count()),
            },
        }
    }

    /// Label for the card's call-to-action button.
    #[must_use]
    pub const fn action_label(&self) -> &'static str {
        if self.variant_count.is_some() {
            "View group"
        } else {
            "View a product"
        }
    }
}

/// One horizontally scrolling rail.
#[derive(Clone)]
pub struct RailView {
    pub category_id: String,
    pub name: String,
    pub cards: Vec<CardView>,
    pub has_more: bool,
    pub view_all_href: String,
}

impl RailView {
    fn from_rail(rail: &CappedRail, currency: CurrencyCode) -> Self {
        Self {
            category_id: rail.category.id.to_string(),
            name: rail.category.name.clone(),
            cards: rail
                .items
                .iter()
                .map(|item| CardView::from_item(item, currency))
                .collect(),
            has_more: rail.has_more,
            view_all_href: format!(
                "/products?category={}",
                urlencoding::encode(rail.category.id.as_str())
            ),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: Vec<NavItem>,
    pub query: String,
    pub pills: Vec<CategoryPill>,
    pub rails: Vec<RailView>,
    /// No item matched the search and category filter.
    pub no_results: bool,
}

/// Shown when the catalog cannot be loaded.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub nav: Vec<NavItem>,
    pub message: String,
}

fn pills(catalog: &Catalog, selected: Option<&str>) -> Vec<CategoryPill> {
    std::iter::once(CategoryPill {
        id: String::new(),
        name: "All".to_string(),
        active: selected.is_none(),
    })
    .chain(catalog.categories().iter().map(|category| CategoryPill {
        id: category.id.to_string(),
        name: category.name.clone(),
        active: selected == Some(category.id.as_str()),
    }))
    .collect()
}

/// Build the home page for an already-fetched catalog.
#[must_use]
pub fn render_home(
    catalog: &Catalog,
    query: &HomeQuery,
    state: &AppState,
    nav: Vec<NavItem>,
) -> HomeTemplate {
    let config = state.config();
    let selected = query.selected_category();
    let browse: Browse = catalog.browse(&query.q, selected, config.rail_cap);

    HomeTemplate {
        nav,
        query: query.q.clone(),
        pills: pills(catalog, selected),
        rails: browse
            .rails
            .iter()
            .map(|rail| RailView::from_rail(rail, config.currency))
            .collect(),
        no_results: browse.is_empty(),
    }
}

/// Display the home page.
#[instrument(skip(state, user))]
pub async fn home(
    State(state): State<AppState>,
    Query(query): Query<HomeQuery>,
    OptionalUser(user): OptionalUser,
) -> Response {
    let nav = nav_items("/", user.is_some());

    match CatalogRepository::new(state.store()).snapshot().await {
        Ok((products, categories)) => {
            let catalog = Catalog::new(products, &categories);
            tracing::debug!(
                products = catalog.products().len(),
                items = catalog.items().len(),
                categories = catalog.categories().len(),
                "catalog loaded"
            );
            render_home(&catalog, &query, &state, nav).into_response()
        }
        Err(e) => {
            let event_id = sentry::capture_error(&e);
            tracing::error!(error = %e, sentry_event_id = %event_id, "Failed to load catalog");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorTemplate {
                    nav,
                    message: "We couldn't load the catalog. Please try again.".to_string(),
                },
            )
                .into_response()
        }
    }
}
