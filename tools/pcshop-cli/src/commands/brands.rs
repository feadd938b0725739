//! Brand facet for a category.

use anyhow::{anyhow, Result};
use pcshop_commerce::search::{brand_facet, filter_products, CategoryFilter, FilterState};

use super::BrandsArgs;
use crate::context::Context;

/// Run the brands command.
pub async fn run(args: BrandsArgs, ctx: &Context) -> Result<()> {
    let category = match &args.category {
        Some(raw) => {
            CategoryFilter::from_str(raw).ok_or_else(|| anyhow!("Unknown category: {}", raw))?
        }
        None => ctx.config.default_category(),
    };
    let mut state = FilterState::for_category(category);
    if let Some(part_type) = &args.part_type {
        state = state.with_part_type(part_type.clone());
    }

    let products = ctx
        .fetch_products(&args.source, category, state.part_kind())
        .await?;
    let scoped = filter_products(&products, &state);
    let facet = brand_facet(&scoped, None);

    if ctx.output.is_json() {
        ctx.output.json(&facet);
        return Ok(());
    }

    ctx.output.header(&format!("Brands ({})", category));
    if facet.values.is_empty() {
        ctx.output.info("No brands found");
        return Ok(());
    }
    for value in &facet.values {
        ctx.output
            .list_item(&format!("{} ({})", value.value, value.count));
    }
    Ok(())
}
