//! Rail preview from a seed file.
//!
//! Reads the same `{collection: {key: document}}` JSON the storefront seeds
//! its store with and prints what the home page would render.

use std::io::Write;
use std::path::Path;

use duka_core::catalog::{Browse, Catalog, Category, DisplayItem, Product, RailCap};
use duka_core::{CurrencyCode, Price};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use super::CliError;

/// Options for [`preview`].
#[derive(Debug, Clone, Default)]
pub struct PreviewOptions {
    pub query: String,
    pub category: Option<String>,
    pub cap: i64,
    pub json: bool,
}

/// Decode one seed collection into records, injecting the document key as
/// `id`. Undecodable documents are skipped with a warning.
fn decode_collection<T>(seed: &Map<String, Value>, collection: &str) -> Result<Vec<T>, CliError>
where
    T: serde::de::DeserializeOwned,
{
    let Some(documents) = seed.get(collection) else {
        return Ok(Vec::new());
    };
    let Value::Object(documents) = documents else {
        return Err(CliError::Seed(format!(
            "collection {collection:?} must map keys to documents"
        )));
    };

    Ok(documents
        .iter()
        .filter_map(|(key, document)| {
            let Some(fields) = document.as_object() else {
                tracing::warn!(collection, key, "skipping non-object document");
                return None;
            };
            let mut fields = fields.clone();
            fields
                .entry("id")
                .or_insert_with(|| Value::String(key.clone()));
            match serde_json::from_value(Value::Object(fields)) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(collection, key, error = %e, "skipping malformed document");
                    None
                }
            }
        })
        .collect())
}

/// Parse seed JSON into products and categories.
///
/// # Errors
///
/// Returns `CliError::Seed` if the top level or a collection is not an object.
pub fn parse_seed(raw: &str) -> Result<(Vec<Product>, Vec<Category>), CliError> {
    let Value::Object(seed) = serde_json::from_str(raw)? else {
        return Err(CliError::Seed("top level must be an object".to_string()));
    };
    Ok((
        decode_collection(&seed, "products")?,
        decode_collection(&seed, "categories")?,
    ))
}

fn price(amount: Option<Decimal>) -> String {
    amount.map_or_else(
        || "no price".to_string(),
        |amount| Price::new(amount, CurrencyCode::default()).display(),
    )
}

fn describe(item: &DisplayItem) -> String {
    match item {
        DisplayItem::Group(group) => format!(
            "[group] {} ({})  From {}",
            group.name,
            group.variant_count(),
            price(group.min_price)
        ),
        DisplayItem::Standalone(product) => {
            let mut line = format!("[item]  {}  {}", product.name, price(product.parsed_price()));
            if let Some(old) = product.parsed_old_price() {
                line.push_str(&format!("  was {}", price(Some(old))));
            }
            line
        }
    }
}

/// Write a text rendering of `browse`.
///
/// # Errors
///
/// Returns `CliError::Io` if writing fails.
pub fn write_text(out: &mut impl Write, browse: &Browse) -> Result<(), CliError> {
    if browse.is_empty() {
        writeln!(out, "No products found")?;
        return Ok(());
    }

    for rail in &browse.rails {
        write!(
            out,
            "{} ({})  {} of {}",
            rail.category.name,
            rail.category.id,
            rail.items.len(),
            rail.total
        )?;
        if rail.has_more {
            write!(out, "  View All")?;
        }
        writeln!(out)?;
        for item in &rail.items {
            writeln!(out, "  {}", describe(item))?;
        }
    }
    Ok(())
}

/// Build and print the rails for a seed file.
///
/// # Errors
///
/// Returns an error if the seed cannot be read or parsed, the cap is not
/// positive, or output fails.
pub fn preview(
    out: &mut impl Write,
    seed_path: &Path,
    options: &PreviewOptions,
) -> Result<(), CliError> {
    let cap = RailCap::new(options.cap)?;
    let raw = std::fs::read_to_string(seed_path)?;
    let (products, categories) = parse_seed(&raw)?;
    tracing::info!(
        products = products.len(),
        categories = categories.len(),
        "seed loaded"
    );

    let catalog = Catalog::new(products, &categories);
    let browse = catalog.browse(&options.query, options.category.as_deref(), cap);

    if options.json {
        serde_json::to_writer_pretty(&mut *out, &browse)?;
        writeln!(out)?;
    } else {
        write_text(out, &browse)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    const SEED: &str = r#"{
        "categories": {
            "shoes": {"name": "Shoes"},
            "bags": {"name": "Bags"}
        },
        "products": {
            "p1": {"name": "Trail Runner", "category": "shoes", "price": "90000", "groupId": "tr"},
            "p2": {"name": "Trail Runner", "category": "shoes", "price": 85000, "groupId": "tr"},
            "p3": {"name": "Sandal", "category": "shoes", "price": 20000, "oldPrice": 25000},
            "p4": {"name": "Tote", "category": "bags", "price": "oops"},
            "p5": "not a document"
        }
    }"#;

    #[test]
    fn test_parse_seed_injects_keys() {
        let (products, categories) = parse_seed(SEED).unwrap();
        assert_eq!(products.len(), 4);
        assert_eq!(products[0].id.as_str(), "p1");
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[1].id.as_str(), "shoes");
    }

    #[test]
    fn test_parse_seed_rejects_non_object() {
        assert!(matches!(parse_seed("[]"), Err(CliError::Seed(_))));
        assert!(matches!(
            parse_seed(r#"{"products": []}"#),
            Err(CliError::Seed(_))
        ));
    }

    #[test]
    fn test_text_preview() {
        let (products, categories) = parse_seed(SEED).unwrap();
        let catalog = Catalog::new(products, &categories);
        let browse = catalog.browse("", None, RailCap::new(1).unwrap());

        let mut out = Vec::new();
        write_text(&mut out, &browse).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "Bags (bags)  1 of 1\n\
             \x20 [item]  Tote  no price\n\
             Shoes (shoes)  1 of 2  View All\n\
             \x20 [group] Trail Runner (2)  From TZS 85,000\n"
        );
    }

    #[test]
    fn test_text_preview_no_match() {
        let (products, categories) = parse_seed(SEED).unwrap();
        let browse = Catalog::new(products, &categories).browse("kettle", None, RailCap::DEFAULT);

        let mut out = Vec::new();
        write_text(&mut out, &browse).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No products found\n");
    }

    #[test]
    fn test_old_price_is_shown() {
        let (products, _) = parse_seed(SEED).unwrap();
        let sandal = DisplayItem::Standalone(products[2].clone());
        assert_eq!(
            describe(&sandal),
            "[item]  Sandal  TZS 20,000  was TZS 25,000"
        );
    }
}
