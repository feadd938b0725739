//! Interactive PC builder.

use anyhow::{anyhow, Result};
use dialoguer::{MultiSelect, Select};
use pcshop_commerce::builder::{BuildSlot, CandidateRequest, PcBuild, SlotState};
use pcshop_commerce::cart::Cart;
use pcshop_commerce::catalog::{Category, Product};
use pcshop_commerce::CommerceError;
use pcshop_data::{ProductApi, ReqwestTransport};
use tracing::debug;

use super::BuildArgs;
use crate::context::{read_products, Context};
use crate::output::format_price;

/// Where picker candidates come from.
enum Candidates {
    Local(Vec<Product>),
    Api(ProductApi<ReqwestTransport>),
}

impl Candidates {
    async fn load(&self, request: &CandidateRequest) -> Result<Vec<Product>> {
        match self {
            Candidates::Local(all) => Ok(local_candidates(all, request)),
            Candidates::Api(api) => api.load_candidates(request).await.map_err(|e| {
                debug!(error = %e, slot = %request.slot, "candidate fetch failed");
                anyhow!(e.user_message())
            }),
        }
    }
}

/// Parts of the request's kind from a local dump.
pub fn local_candidates(all: &[Product], request: &CandidateRequest) -> Vec<Product> {
    all.iter()
        .filter(|p| request.category.matches_stored(&p.category))
        .filter(|p| p.part_kind() == Some(request.part_kind))
        .cloned()
        .collect()
}

/// Cheapest priced product with stock.
pub fn cheapest_in_stock(candidates: &[Product]) -> Option<&Product> {
    candidates
        .iter()
        .filter(|p| p.is_in_stock() && p.price.is_some())
        .min_by_key(|p| p.price)
}

enum MenuChoice {
    Slot(BuildSlot),
    Checkout,
    Quit,
}

/// Run the build command.
pub async fn run(args: BuildArgs, ctx: &Context) -> Result<()> {
    let candidates = match ctx.product_file(&args.source) {
        Some(path) => Candidates::Local(read_products(&path)?),
        None => Candidates::Api(ctx.api()?),
    };

    let mut build = PcBuild::new();

    if args.yes {
        auto_fill(&mut build, &candidates, ctx).await?;
    } else {
        loop {
            render_build(&build, ctx);
            match menu(&build)? {
                MenuChoice::Slot(slot) => pick_part(&mut build, slot, &candidates, ctx).await?,
                MenuChoice::Checkout => break,
                MenuChoice::Quit => {
                    ctx.output.warn("Build discarded");
                    return Ok(());
                }
            }
        }
    }

    checkout(&mut build, ctx)
}

async fn auto_fill(build: &mut PcBuild, candidates: &Candidates, ctx: &Context) -> Result<()> {
    for slot in BuildSlot::ALL {
        let request = build.open_picker(slot);
        let products = candidates.load(&request).await?;
        build.receive_candidates(request.ticket, products);

        let choice = cheapest_in_stock(&build.picker_candidates()).cloned();
        match choice {
            Some(product) => {
                build.select_product(slot, &product)?;
                ctx.output.debug(&format!("{}: {}", slot.label(), product.name));
            }
            None => {
                build.close_picker();
                ctx.output
                    .warn(&format!("No {} in stock, slot left empty", slot.label()));
            }
        }
    }
    Ok(())
}

fn render_build(build: &PcBuild, ctx: &Context) {
    ctx.output.header("Your build");
    for (slot, state) in build.slots() {
        let value = match state {
            SlotState::Empty => "-".to_string(),
            SlotState::Filled(p) => format!("{} ({})", p.name, p.price.display()),
        };
        ctx.output.kv(slot.label(), &value);
    }
    ctx.output
        .kv("Total", &build.total_price().display());
}

fn menu(build: &PcBuild) -> Result<MenuChoice> {
    let mut items: Vec<String> = BuildSlot::ALL
        .iter()
        .map(|slot| match build.slot(*slot) {
            SlotState::Empty => format!("Choose {}", slot.label()),
            SlotState::Filled(_) => format!("Change {}", slot.label()),
        })
        .collect();
    items.push(format!("Add {} parts to cart", build.filled_count()));
    items.push("Quit".to_string());

    let selection = Select::new()
        .with_prompt("What next?")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(match selection {
        i if i < BuildSlot::ALL.len() => MenuChoice::Slot(BuildSlot::ALL[i]),
        i if i == BuildSlot::ALL.len() => MenuChoice::Checkout,
        _ => MenuChoice::Quit,
    })
}

async fn pick_part(
    build: &mut PcBuild,
    slot: BuildSlot,
    candidates: &Candidates,
    ctx: &Context,
) -> Result<()> {
    let request = build.open_picker(slot);
    let products = match candidates.load(&request).await {
        Ok(products) => products,
        Err(e) => {
            build.close_picker();
            ctx.output.error(&e.to_string());
            return Ok(());
        }
    };
    build.receive_candidates(request.ticket, products);

    let brands = build.picker_brands();
    if brands.len() > 1 {
        let chosen = MultiSelect::new()
            .with_prompt("Filter by brand (space to toggle, enter for all)")
            .items(&brands)
            .interact()?;
        if let Some(filter) = build.picker_filter_mut() {
            for i in chosen {
                filter.toggle_brand(&brands[i]);
            }
        }
    }

    let visible = build.picker_candidates();
    if visible.is_empty() {
        ctx.output
            .warn(&format!("No {} available", slot.label()));
        build.close_picker();
        return Ok(());
    }

    let items: Vec<String> = visible
        .iter()
        .map(|p| {
            let stock = if p.is_in_stock() { String::new() } else { " [out of stock]".to_string() };
            format!("{} - {}{}", p.name, format_price(p.price), stock)
        })
        .collect();

    let selection = Select::new()
        .with_prompt(format!("Select {}", slot.label()))
        .items(&items)
        .default(0)
        .interact_opt()?;

    let Some(index) = selection else {
        build.close_picker();
        return Ok(());
    };

    match build.select_product(slot, &visible[index]) {
        Ok(()) => ctx
            .output
            .success(&format!("{}: {}", slot.label(), visible[index].name)),
        Err(e @ (CommerceError::OutOfStock(_) | CommerceError::MissingPrice(_))) => {
            ctx.output.warn(&e.to_string());
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn checkout(build: &mut PcBuild, ctx: &Context) -> Result<()> {
    let mut cart = Cart::new("pcshop-cli");

    let report = match build.add_all_to_cart(&mut cart) {
        Ok(report) => report,
        Err(CommerceError::EmptyBuild) => {
            ctx.output.warn("No parts selected, nothing added to the cart");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    for failure in &report.failed {
        ctx.output.warn(&format!(
            "{} not added: {}",
            failure.slot.label(),
            failure.error
        ));
    }

    if ctx.output.is_json() {
        ctx.output.json(&cart);
        return Ok(());
    }

    ctx.output.header("Cart");
    for item in &cart.items {
        ctx.output.kv(
            &item.product_name,
            &format!("{} x {} = {}", item.quantity, item.unit_price.display(), item.total_price.display()),
        );
    }
    ctx.output
        .kv("Subtotal", &cart.subtotal()?.display());

    if report.is_complete() {
        ctx.output
            .success(&format!("Added {} parts to the cart", report.added.len()));
    } else {
        ctx.output.warn(&format!(
            "Added {} parts; {} kept in the build",
            report.added.len(),
            report.failed.len()
        ));
    }
    Ok(())
}
