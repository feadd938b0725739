//! Filtered product listing.

use anyhow::{anyhow, Result};
use pcshop_commerce::search::{filter_product_refs, CategoryFilter, FilterState, PriceRange};

use super::ProductsArgs;
use crate::context::Context;
use crate::output::{format_price, sale_badge, stock_badge};

/// Build the filter state from a query string and flags; flags win.
pub fn filter_state(args: &ProductsArgs, default: CategoryFilter) -> Result<FilterState> {
    let mut state = match &args.query {
        Some(qs) => FilterState::from_query_string(qs),
        None => FilterState::for_category(default),
    };

    if let Some(raw) = &args.category {
        let category =
            CategoryFilter::from_str(raw).ok_or_else(|| anyhow!("Unknown category: {}", raw))?;
        state.set_category(category);
    }
    if let Some(brand) = &args.brand {
        state = state.with_brand(brand.clone());
    }
    if let Some(usage) = &args.usage {
        state = state.with_usage(usage.clone());
    }
    if let Some(part_type) = &args.part_type {
        state = state.with_part_type(part_type.clone());
    }
    if let Some(search) = &args.search {
        state.set_search(search);
    }
    if args.min_price.is_some() || args.max_price.is_some() {
        state.set_price_range(PriceRange::new(args.min_price, args.max_price));
    }
    Ok(state)
}

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let state = filter_state(&args, ctx.config.default_category())?;
    ctx.output
        .debug(&format!("Filter: {}", state.to_query_string()));

    let products = ctx
        .fetch_products(&args.source, state.category, state.part_kind())
        .await?;
    let visible = filter_product_refs(&products, &state);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "query": state.to_query_string(),
            "total": visible.len(),
            "products": visible,
        }));
        return Ok(());
    }

    let title = match state.category.category() {
        Some(category) => category.display_name(),
        None => state.category.as_str(),
    };
    ctx.output.header(&format!("Products ({})", title));

    if visible.is_empty() {
        if state.is_narrowed() {
            ctx.output.info("No products match the current filters");
        } else {
            ctx.output.info("No products in this category");
        }
        return Ok(());
    }

    let widths = [12, 40, 12, 16, 16, 8];
    ctx.output
        .table_row(&["ID", "NAME", "BRAND", "PRICE", "WAS", "STOCK"], &widths);
    for product in visible.iter().take(ctx.config.display.max_rows) {
        let price = format_price(product.price);
        let was = sale_badge(product);
        let stock = stock_badge(product.stock);
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.name,
                product.brand.as_deref().unwrap_or("-"),
                &price,
                &was,
                &stock,
            ],
            &widths,
        );
    }

    if visible.len() > ctx.config.display.max_rows {
        ctx.output.info(&format!(
            "Showing {} of {} products",
            ctx.config.display.max_rows,
            visible.len()
        ));
    } else {
        ctx.output
            .info(&format!("{} products", visible.len()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::SourceArgs;
    use pcshop_commerce::catalog::Category;

    fn args() -> ProductsArgs {
        ProductsArgs {
            source: SourceArgs::default(),
            query: None,
            category: None,
            brand: None,
            usage: None,
            part_type: None,
            search: None,
            min_price: None,
            max_price: None,
        }
    }

    #[test]
    fn test_defaults_to_configured_category() {
        let state = filter_state(&args(), CategoryFilter::Only(Category::Monitor)).unwrap();
        assert_eq!(state.category, CategoryFilter::Only(Category::Monitor));
    }

    #[test]
    fn test_flags_override_query() {
        let mut a = args();
        a.query = Some("category=laptop&brand=Dell".into());
        a.category = Some("linh kien".into());
        a.part_type = Some("ram".into());

        let state = filter_state(&a, CategoryFilter::default()).unwrap();
        assert_eq!(state.category, CategoryFilter::Only(Category::Parts));
        assert_eq!(state.brand, None);
        assert_eq!(state.part_type.as_deref(), Some("ram"));
    }

    #[test]
    fn test_type_flag_ignored_outside_parts() {
        let mut a = args();
        a.category = Some("all".into());
        a.part_type = Some("ram".into());
        let state = filter_state(&a, CategoryFilter::default()).unwrap();
        assert_eq!(state.part_kind(), None);

        a.category = Some("parts".into());
        let state = filter_state(&a, CategoryFilter::default()).unwrap();
        assert_eq!(state.part_kind(), Some(pcshop_commerce::catalog::PartKind::Ram));
    }

    #[test]
    fn test_unknown_category_flag_is_an_error() {
        let mut a = args();
        a.category = Some("phones".into());
        assert!(filter_state(&a, CategoryFilter::default()).is_err());
    }

    #[test]
    fn test_price_flags_carried() {
        let mut a = args();
        a.max_price = Some(10_000_000);
        let state = filter_state(&a, CategoryFilter::default()).unwrap();
        assert_eq!(state.price_range, PriceRange::new(None, Some(10_000_000)));
    }
}
