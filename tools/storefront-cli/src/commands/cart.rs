//! Cart commands.

use anyhow::Result;
use serde::Serialize;
use storefront_commerce::cart::{Cart, CartLine, RemoveOutcome};
use storefront_commerce::{Money, ProductId};

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart()?;

    match args.command {
        Some(CartCommand::Show) | None => show_cart(&cart, ctx),
        Some(CartCommand::Add { id }) => add(&mut cart, id, ctx).await,
        Some(CartCommand::Remove { id }) => {
            remove(&mut cart, id, ctx);
            Ok(())
        }
        Some(CartCommand::Clear) => {
            cart.clear();
            ctx.output.success("Cart cleared.");
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct CartSummary<'a> {
    items: &'a [CartLine],
    item_count: u64,
    total: Money,
}

fn show_cart(cart: &Cart, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&CartSummary {
            items: cart.cart_items(),
            item_count: cart.item_count(),
            total: cart.cart_total(),
        });
        return Ok(());
    }

    ctx.output.header("Cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    let widths = [4, 40, 5, 10];
    ctx.output.table_row(&["ID", "TITLE", "QTY", "SUBTOTAL"], &widths);
    for line in cart.cart_items() {
        ctx.output.table_row(
            &[
                &line.id().to_string(),
                &line.product.title,
                &line.quantity.to_string(),
                &line.subtotal().display(),
            ],
            &widths,
        );
    }
    println!();
    ctx.output.kv("items", &cart.item_count().to_string());
    ctx.output.kv("total", &cart.cart_total().display());

    Ok(())
}

async fn add(cart: &mut Cart, id: ProductId, ctx: &Context) -> Result<()> {
    // Lines already in the cart carry their own product data.
    let product = match cart.line(id) {
        Some(line) => line.product.clone(),
        None => {
            let spinner = ctx.output.spinner("Looking up product...");
            let loaded = ctx.catalog().load_product(id).await;
            spinner.finish_and_clear();
            loaded?
        }
    };

    let quantity = cart.add_to_cart(&product);
    ctx.output
        .success(&format!("Added {} (quantity {}).", product.title, quantity));
    ctx.output.kv("total", &cart.cart_total().display());
    Ok(())
}

fn remove(cart: &mut Cart, id: ProductId, ctx: &Context) {
    let title = cart.line(id).map(|l| l.product.title.clone());
    match (cart.remove_from_cart(id), title) {
        (RemoveOutcome::NotInCart, _) => {
            ctx.output.warn(&format!("Product {} is not in the cart.", id));
        }
        (RemoveOutcome::Decremented(quantity), Some(title)) => {
            ctx.output
                .success(&format!("Removed one {} (quantity {}).", title, quantity));
        }
        (RemoveOutcome::Removed, Some(title)) => {
            ctx.output.success(&format!("Removed {} from the cart.", title));
        }
        (_, None) => {}
    }
    ctx.output.kv("total", &cart.cart_total().display());
}
