//! Product placement commands
//!
//! Each command loads the named project first, so a single invocation is
//! one load-mutate-flush cycle against its document.

use anyhow::Result;
use serde_json::json;

use super::output::Output;
use crate::storage::ProjectStore;

/// Sets (or clears) the products at a location
pub fn place(
    store: &mut ProjectStore,
    output: &Output,
    project: &str,
    location: &str,
    products: Vec<String>,
) -> Result<()> {
    store.load(project)?;

    let cleared = products.is_empty();
    store.set_placements(location, products)?;

    if cleared {
        output.success(&format!("Cleared location '{}'", location));
    } else {
        output.success(&format!(
            "Placed {} product(s) at '{}'",
            store.placements_at(location).len(),
            location
        ));
    }
    Ok(())
}

/// Shows the products at a location
pub fn placements(
    store: &mut ProjectStore,
    output: &Output,
    project: &str,
    location: &str,
) -> Result<()> {
    store.load(project)?;
    let products = store.placements_at(location);

    if output.is_json() {
        output.data(&json!({ "location": location, "products": products }));
    } else if products.is_empty() {
        output.success(&format!("Nothing placed at '{}'", location));
    } else {
        for product in products {
            println!("{product}");
        }
    }
    Ok(())
}

/// Lists every placed product across all locations
pub fn products(store: &mut ProjectStore, output: &Output, project: &str) -> Result<()> {
    store.load(project)?;
    let all = store.all_placed_products();

    if output.is_json() {
        output.data(&all);
    } else if all.is_empty() {
        output.success("No products placed");
    } else {
        for product in all {
            println!("{product}");
        }
    }
    Ok(())
}

/// Finds which location holds a product
pub fn locate(store: &mut ProjectStore, output: &Output, project: &str, product: &str) -> Result<()> {
    store.load(project)?;

    match store.find_location_of(product) {
        Some(location) => {
            if output.is_json() {
                output.data(&json!({ "product": product, "location": location }));
            } else {
                output.success(location);
            }
            Ok(())
        }
        None => anyhow::bail!("Product '{}' is not placed anywhere in '{}'", product, project),
    }
}
