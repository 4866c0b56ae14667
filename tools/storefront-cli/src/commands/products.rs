//! Product listing and detail commands.

use anyhow::{bail, Result};
use storefront_commerce::catalog::Product;
use storefront_commerce::search::TitleFilter;
use storefront_commerce::CommerceError;

use super::{ProductArgs, ProductsArgs};
use crate::context::Context;

const ID_WIDTH: usize = 4;
const TITLE_WIDTH: usize = 48;
const PRICE_WIDTH: usize = 10;

/// List products, filtered by title.
pub async fn list(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog();

    let spinner = ctx.output.spinner("Loading products...");
    let loaded = catalog.ensure_loaded().await;
    spinner.finish_and_clear();
    let products = loaded?;

    let filter = TitleFilter::new(&args.search);
    let shown = filter.apply(&products);

    if ctx.output.is_json() {
        ctx.output.json(&shown);
        return Ok(());
    }

    if filter.is_blank() {
        ctx.output.header("Products");
    } else {
        ctx.output.header(&format!("Products matching '{}'", args.search));
    }

    if shown.is_empty() {
        ctx.output.info("No products found.");
        return Ok(());
    }

    ctx.output
        .table_row(&["ID", "TITLE", "PRICE"], &[ID_WIDTH, TITLE_WIDTH, PRICE_WIDTH]);
    for product in &shown {
        print_row(ctx, product);
    }
    ctx.output
        .info(&format!("{} of {} products", shown.len(), products.len()));

    Ok(())
}

/// Show a single product.
pub async fn show(args: ProductArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog();

    let spinner = ctx.output.spinner("Loading product...");
    let loaded = catalog.load_product(args.id).await;
    spinner.finish_and_clear();

    let product = match loaded {
        Ok(product) => product,
        Err(CommerceError::ProductNotFound(_)) => bail!("Product not found."),
        Err(e) => return Err(e.into()),
    };

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&product.title);
    ctx.output.kv("id", &product.id.to_string());
    ctx.output.kv("price", &product.price.display());
    if !product.category.is_empty() {
        ctx.output.kv("category", &product.category);
    }
    ctx.output.kv(
        "rating",
        &format!("{:.1} ({} reviews)", product.rating.rate, product.rating.count),
    );
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }

    Ok(())
}

fn print_row(ctx: &Context, product: &Product) {
    ctx.output.table_row(
        &[
            &product.id.to_string(),
            &product.title,
            &product.price.display(),
        ],
        &[ID_WIDTH, TITLE_WIDTH, PRICE_WIDTH],
    );
}
