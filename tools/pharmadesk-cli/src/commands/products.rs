//! Product listing commands.

use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use pharmadesk_admin::{ListView, ProductListViewModel, SearchPhase};
use pharmadesk_catalog::{CatalogStats, FileId, Pagination, Product, ProductId};
use pharmadesk_store::{DocumentFileRepository, ProductAssets, SharedRepository};
use serde::Serialize;

use super::{ProductsArgs, ProductsCommand};
use crate::context::Context;
use crate::output::{format_price, phase_badge, truncate};

const COLUMNS: [&str; 6] = ["NAME", "PRICE", "SALE", "STOCK", "AVAILABLE", "TAGS"];
const WIDTHS: [usize; 6] = [28, 10, 10, 6, 9, 16];

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let repo = open_repository(args.documents.as_deref(), ctx)?;
    match args.command {
        ProductsCommand::List { page, tag } => list_products(repo, page, tag, ctx).await,
        ProductsCommand::Search { text, page } => search_products(repo, &text, page, ctx).await,
        ProductsCommand::Stats { tag } => show_stats(repo, tag, ctx).await,
        ProductsCommand::Assets { id } => show_assets(repo, &id, ctx).await,
    }
}

fn open_repository(documents: Option<&str>, ctx: &Context) -> Result<SharedRepository> {
    let path = ctx.documents_path(documents)?;
    ctx.output.debug(&format!("Reading products from {}", path.display()));
    Ok(Arc::new(DocumentFileRepository::new(path)))
}

async fn open_view_model(
    repo: SharedRepository,
    tag: Option<String>,
    ctx: &Context,
) -> ProductListViewModel {
    let mut config = ctx.config.products.clone();
    if let Some(tag) = tag {
        config = config.with_tag(tag);
    }

    let vm = ProductListViewModel::new(repo, config);
    let spinner = ctx.output.spinner("Loading products...");
    vm.load().await;
    spinner.finish_and_clear();
    vm
}

async fn list_products(
    repo: SharedRepository,
    page: usize,
    tag: Option<String>,
    ctx: &Context,
) -> Result<()> {
    let vm = open_view_model(repo, tag, ctx).await;
    vm.set_page(page);
    let view = vm.view();
    vm.close();

    if let SearchPhase::Unavailable { reason } = &view.phase {
        bail!("Products could not be loaded: {}", reason);
    }

    ctx.output.header("Products");
    render(&view, ctx);
    Ok(())
}

async fn search_products(
    repo: SharedRepository,
    text: &str,
    page: usize,
    ctx: &Context,
) -> Result<()> {
    let vm = open_view_model(repo, None, ctx).await;

    let spinner = ctx.output.spinner(&format!("Searching for \"{}\"...", text));
    vm.on_debounced_query_change(text).await;
    spinner.finish_and_clear();

    vm.set_page(page);
    let view = vm.view();
    vm.close();

    if let SearchPhase::NotFound { reason, .. } = &view.phase {
        tracing::debug!(?reason, "search ended without products");
    }

    ctx.output.header(&format!("Search: {}", text));
    render(&view, ctx);
    Ok(())
}

async fn show_stats(repo: SharedRepository, tag: Option<String>, ctx: &Context) -> Result<()> {
    let mut products = repo.list().await.context("Failed to read products")?;
    if let Some(tag) = &tag {
        products.retain(|p| p.has_tag(tag));
    }

    let stats = CatalogStats::from_products(&products);
    if ctx.output.is_json() {
        ctx.output.json(&stats);
        return Ok(());
    }

    match &tag {
        Some(tag) => ctx.output.header(&format!("Stock overview: {}", tag)),
        None => ctx.output.header("Stock overview"),
    }
    ctx.output.kv("total", &stats.total.to_string());
    ctx.output.kv(
        "in stock",
        &format!("{} ({}%)", stats.in_stock, stats.in_stock_percentage()),
    );
    ctx.output.kv("out of stock", &stats.out_of_stock.to_string());
    Ok(())
}

async fn show_assets(repo: SharedRepository, id: &str, ctx: &Context) -> Result<()> {
    let products = repo.list().await.context("Failed to read products")?;
    let Some(product) = products.iter().find(|p| p.id.as_str() == id) else {
        bail!("Product not found: {}", id);
    };

    let assets = ProductAssets::of(product);
    let file_ids = assets.file_ids();
    if ctx.output.is_json() {
        ctx.output.json(&AssetsReport {
            product: &product.id,
            assets: &assets,
            file_ids: &file_ids,
        });
        return Ok(());
    }

    ctx.output.header(&format!("Assets for {}", product.display_name()));
    ctx.output.kv("image", assets.image.as_ref().map_or("(none)", |f| f.as_str()));
    ctx.output.kv(
        "hover image",
        assets.hover_image.as_ref().map_or("(none)", |f| f.as_str()),
    );
    let ids: Vec<&str> = file_ids.iter().map(|f| f.as_str()).collect();
    if ids.is_empty() {
        ctx.output.info("No stored files referenced.");
    } else {
        ctx.output.info(&format!("Deleting this product removes: {}", ids.join(", ")));
    }
    Ok(())
}

#[derive(Serialize)]
struct AssetsReport<'a> {
    product: &'a ProductId,
    assets: &'a ProductAssets,
    file_ids: &'a [FileId],
}

fn render(view: &ListView, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(view);
        return;
    }

    ctx.output.kv("showing", &phase_badge(&view.phase));

    if let Some(message) = view.message() {
        ctx.output.warn(message);
        return;
    }

    if view.products.is_empty() {
        ctx.output.info("Nothing on this page.");
    } else {
        println!();
        ctx.output.table_row(&COLUMNS, &WIDTHS);
        for product in &view.products {
            let row = product_row(product);
            let cols: Vec<&str> = row.iter().map(String::as_str).collect();
            ctx.output.table_row(&cols, &WIDTHS);
        }
        println!();
    }

    ctx.output.info(&page_summary(&view.pagination));
}

fn page_summary(pagination: &Pagination) -> String {
    if pagination.is_out_of_range() {
        format!(
            "Page {} is past the last page ({})",
            pagination.page, pagination.total_pages
        )
    } else {
        format!(
            "Page {} of {} ({} products)",
            pagination.page, pagination.total_pages, pagination.total
        )
    }
}

fn product_row(product: &Product) -> [String; 6] {
    let sale = if product.is_discounted() {
        format!(
            "{} -{}%",
            format_price(product.discounted_price()),
            product.discount_percentage
        )
    } else {
        "-".to_string()
    };
    [
        truncate(&product.display_name(), WIDTHS[0]),
        format_price(product.price),
        sale,
        product.stock.to_string(),
        if product.in_stock { "yes" } else { "no" }.to_string(),
        truncate(&product.tags, WIDTHS[5]),
    ]
}
