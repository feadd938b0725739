//! Specification schema inspection.

use anyhow::Result;
use pcshop_commerce::catalog::{get_specs_fields, Category, PartKind, SpecSchema};

use super::SpecsArgs;
use crate::context::Context;

/// Every schema in the registry, in menu order.
fn all_schemas() -> Vec<SpecSchema> {
    let mut schemas = vec![SpecSchema::Laptop, SpecSchema::Monitor];
    schemas.extend(PartKind::ALL.iter().map(|kind| SpecSchema::Part(*kind)));
    schemas
}

fn schema_title(schema: SpecSchema) -> &'static str {
    match schema {
        SpecSchema::Laptop => Category::Laptop.display_name(),
        SpecSchema::Monitor => Category::Monitor.display_name(),
        SpecSchema::Part(kind) => kind.display_name(),
    }
}

/// Run the specs command.
pub async fn run(args: SpecsArgs, ctx: &Context) -> Result<()> {
    let Some(category) = args.category else {
        return list_schemas(ctx);
    };

    let fields = get_specs_fields(&category, args.sub_category.as_deref());

    if ctx.output.is_json() {
        ctx.output.json(&fields);
        return Ok(());
    }

    let title = match &args.sub_category {
        Some(sub) if Category::Parts.matches_stored(&category) => format!("{} / {}", category, sub),
        _ => category.clone(),
    };
    ctx.output.header(&format!("Specification fields: {}", title));

    if fields.is_empty() {
        ctx.output
            .warn("No specification schema for this category");
        return Ok(());
    }

    let widths = [18, 20, 30];
    ctx.output
        .table_row(&["KEY", "LABEL", "EXAMPLE"], &widths);
    for field in fields {
        ctx.output
            .table_row(&[field.name, field.label, field.placeholder], &widths);
    }
    Ok(())
}

fn list_schemas(ctx: &Context) -> Result<()> {
    let schemas = all_schemas();

    if ctx.output.is_json() {
        let keys: Vec<_> = schemas
            .iter()
            .map(|s| serde_json::json!({ "key": s.key(), "fields": s.fields().len() }))
            .collect();
        ctx.output.json(&keys);
        return Ok(());
    }

    ctx.output.header("Specification schemas");
    for schema in schemas {
        ctx.output
            .list_item(&format!(
                "{:<16} {} ({} fields)",
                schema.key(),
                schema_title(schema),
                schema.fields().len()
            ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_schemas_have_fields() {
        let schemas = all_schemas();
        assert_eq!(schemas.len(), 10);
        assert!(schemas.iter().all(|s| !s.fields().is_empty()));
        assert!(schemas.iter().any(|s| s.key() == "partsgpu"));
        assert_eq!(schema_title(SpecSchema::Part(PartKind::Gpu)), "Graphics Card");
        assert_eq!(schema_title(SpecSchema::Laptop), "Laptops");
    }
}
