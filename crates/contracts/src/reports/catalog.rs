//! Static catalog of every report page

use crate::shared::report_view::{
    ColumnDescriptor as Col, ColumnSchema, ReportViewError, StatCard,
};

use super::{CatalogEntry, ReportDefinition};

const RED: &str = "#ef4444";
const ORANGE: &str = "#f97316";
const YELLOW: &str = "#f5c518";
const VIOLET: &str = "#a78bfa";
const GREEN: &str = "#22c55e";

/// Cards on the home page, in display order
pub fn entries() -> Vec<CatalogEntry> {
    definitions()
        .into_iter()
        .filter_map(Result::ok)
        .map(|d| d.entry)
        .collect()
}

/// All report definitions; fails on the first invalid one
pub fn all() -> Result<Vec<ReportDefinition>, ReportViewError> {
    definitions().into_iter().collect()
}

pub fn find(slug: &str) -> Result<ReportDefinition, ReportViewError> {
    definitions()
        .into_iter()
        .filter_map(Result::ok)
        .find(|d| d.slug() == slug)
        .ok_or_else(|| ReportViewError::UnknownReport(slug.to_string()))
}

fn definitions() -> Vec<Result<ReportDefinition, ReportViewError>> {
    vec![
        brand_stock(),
        dead_stock("dead-stock", "Dead Stock", "Items unsold for 3+ years", RED),
        dead_stock(
            "dead-stock-unlisted",
            "Dead Stock — Not on eBay",
            "Not yet listed for clearance",
            ORANGE,
        ),
        overstocked(),
        product_gap("no-category", "No Category", "In-stock products with no category"),
        product_gap("tba-brand", "TBA Brand", "Products needing brand assignment"),
        product_gap("no-package", "No Package", "Products missing package type"),
        gpt_gap(
            "gpt-no-package",
            "GPT Done - No Package",
            "GPT processed, missing package type",
        ),
        gpt_gap(
            "gpt-no-category",
            "GPT Done - No Category",
            "GPT processed, missing category",
        ),
        vml_fitment(),
    ]
}

fn brand_stock() -> Result<ReportDefinition, ReportViewError> {
    ReportDefinition::builder("brand-stock", "Brand Stock")
        .description("SKU count and QOH by brand")
        .accent(YELLOW)
        .card(StatCard::count("Brands").accent(YELLOW))
        .card(StatCard::sum("Total SKUs", "SKU_Count"))
        .card(StatCard::sum("Total QOH", "Total_QOH"))
        .list(
            "/api/brand-stock",
            "Brands",
            ColumnSchema::new(vec![
                Col::text("Brand", "Brand"),
                Col::text("Supplier", "Supplier"),
                Col::number("SKU_Count", "SKU Count").integer(),
                Col::number("Total_QOH", "Total QOH").integer(),
            ]),
        )
        .default_sort("SKU_Count", false)
        .build()
}

fn aggregate_columns(key: &str, label: &str, units: (&str, &str)) -> ColumnSchema {
    ColumnSchema::new(vec![
        Col::text(key, label),
        Col::number("SKUCount", "SKUs").integer(),
        Col::number("TotalValue", "Value").currency(),
        Col::number(units.0, units.1).integer(),
    ])
}

fn dead_stock(
    slug: &str,
    title: &str,
    description: &str,
    accent: &str,
) -> Result<ReportDefinition, ReportViewError> {
    let api = format!("/api/{}", slug);
    let units = ("TotalUnits", "Units");

    ReportDefinition::builder(slug, title)
        .description(description)
        .accent(accent)
        .summary_provider(&format!("{}/summary", api))
        .card(StatCard::provided("Dead SKUs", "TotalSKUs").accent(YELLOW))
        .card(StatCard::provided("Total Value", "TotalValue").currency())
        .card(StatCard::provided("Total Units", "TotalUnits"))
        .card(StatCard::provided("Never Sold", "NeverSold").accent(RED))
        .breakdown(
            "By Brand",
            &format!("{}/by-brand", api),
            aggregate_columns("Brand", "Brand", units),
        )
        .breakdown(
            "By Category",
            &format!("{}/by-category", api),
            aggregate_columns("Category", "Category", units),
        )
        .breakdown(
            "By Age",
            &format!("{}/by-age", api),
            aggregate_columns("AgeBracket", "Age Bracket", units),
        )
        .list(
            &format!("{}/list", api),
            "All Dead Stock",
            ColumnSchema::new(vec![
                Col::text("SKU", "SKU"),
                Col::text("Title", "Title"),
                Col::text("Brand", "Brand"),
                Col::text("Category", "Category"),
                Col::text("Location", "Location").export_only(),
                Col::number("Stock", "Stock").integer(),
                Col::number("StockValue", "Value").currency(),
                Col::date("LastSaleDate", "Last Sale")
                    .export_only()
                    .null_as("Never"),
                Col::number("DaysSinceSale", "Days")
                    .integer()
                    .export_as("Days Since Sale"),
                Col::text("AgeBracket", "Age")
                    .unsorted()
                    .export_as("Age Bracket"),
            ]),
        )
        .default_sort("StockValue", false)
        .build()
}

fn overstocked() -> Result<ReportDefinition, ReportViewError> {
    let units = ("TotalOverstock", "Excess");

    ReportDefinition::builder("overstocked", "Overstocked")
        .description("Items exceeding max stock level")
        .accent(VIOLET)
        .summary_provider("/api/overstocked/summary")
        .card(StatCard::provided("Overstocked SKUs", "TotalSKUs").accent(VIOLET))
        .card(StatCard::provided("Total Value", "TotalValue").currency())
        .card(StatCard::provided("Current Stock", "TotalUnits"))
        .card(StatCard::provided("Excess Units", "TotalOverstock").accent(ORANGE))
        .breakdown(
            "By Brand",
            "/api/overstocked/by-brand",
            aggregate_columns("Brand", "Brand", units),
        )
        .breakdown(
            "By Category",
            "/api/overstocked/by-category",
            aggregate_columns("Category", "Category", units),
        )
        .list(
            "/api/overstocked/list",
            "All Overstocked Items",
            ColumnSchema::new(vec![
                Col::text("SKU", "SKU"),
                Col::text("Title", "Title"),
                Col::text("Brand", "Brand"),
                Col::text("Category", "Category"),
                Col::text("Location", "Location").export_only(),
                Col::number("CurrentStock", "Current")
                    .integer()
                    .export_as("Current Stock"),
                Col::number("MaxLevel", "Max").integer().export_as("Max Level"),
                Col::number("OverstockedBy", "Excess")
                    .integer()
                    .export_as("Overstocked By"),
                Col::number("StockValue", "Value").currency(),
            ]),
        )
        .default_sort("OverstockedBy", false)
        .build()
}

/// In-stock products missing an attribute (category, brand, package type)
fn product_gap(slug: &str, title: &str, description: &str) -> Result<ReportDefinition, ReportViewError> {
    ReportDefinition::builder(slug, title)
        .description(description)
        .card(StatCard::count("Products"))
        .card(StatCard::sum("Units In Stock", "Stock"))
        .list(
            &format!("/api/{}", slug),
            "Products",
            ColumnSchema::new(vec![
                Col::text("SKU", "SKU"),
                Col::text("Title", "Title"),
                Col::text("Brand", "Brand"),
                Col::text("Supplier", "Supplier"),
                Col::number("Stock", "Stock").integer(),
            ]),
        )
        .default_sort("Stock", false)
        .build()
}

/// Products already enriched by GPT but still missing an attribute
fn gpt_gap(slug: &str, title: &str, description: &str) -> Result<ReportDefinition, ReportViewError> {
    ReportDefinition::builder(slug, title)
        .description(description)
        .card(StatCard::count("Products"))
        .list(
            &format!("/api/{}", slug),
            "Products",
            ColumnSchema::new(vec![
                Col::text("SKU", "SKU"),
                Col::text("Description", "Description"),
            ]),
        )
        .default_sort("SKU", true)
        .build()
}

fn vml_fitment() -> Result<ReportDefinition, ReportViewError> {
    ReportDefinition::builder("vml-fitment", "VML Fitment")
        .description("VML completion and fitment coverage")
        .accent(GREEN)
        .summary_provider("/api/vml-fitment/summary")
        .card(StatCard::provided("Fitment Missing VML", "FitmentMissingVML").accent(RED))
        .card(StatCard::provided("Products No FitRef", "ProductsNoFitRef").accent(ORANGE))
        .card(StatCard::provided("Incomplete Ktypes", "IncompleteKtypes").accent(YELLOW))
        .card(StatCard::provided("Total Incomplete EPIDs", "TotalIncompleteEPIDs").accent(VIOLET))
        .breakdown(
            "Fitment by Ktype",
            "/api/vml-fitment/fitment-missing-vml",
            ColumnSchema::new(vec![
                Col::text("ktype", "Ktype"),
                Col::number("FitmentRecords", "Fitment Records").integer(),
            ]),
        )
        .breakdown_export("fitment-missing-vml")
        .breakdown(
            "VML Incomplete",
            "/api/vml-fitment/vml-incomplete",
            ColumnSchema::new(vec![
                Col::text("ktype", "Ktype"),
                Col::number("EPIDCount", "EPIDs").integer(),
            ]),
        )
        .breakdown_export("vml-incomplete")
        .list(
            "/api/vml-fitment/products-no-fitref",
            "Products No FitRef",
            ColumnSchema::new(vec![
                Col::text("SKU", "SKU"),
                Col::text("Title", "Title"),
                Col::text("BrandName", "Brand"),
                Col::text("CategoryName", "Category"),
            ]),
        )
        .default_sort("SKU", true)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_definition_builds() {
        let defs = all().unwrap();
        assert_eq!(defs.len(), 10);
        for def in &defs {
            assert!(def.list.columns.contains(&def.list.default_sort.key), "{}", def.slug());
        }
    }

    #[test]
    fn test_slugs_are_unique() {
        let slugs: HashSet<String> = entries().into_iter().map(|e| e.slug).collect();
        assert_eq!(slugs.len(), 10);
    }

    #[test]
    fn test_provided_cards_need_a_summary_provider() {
        use crate::shared::report_view::Metric;
        for def in all().unwrap() {
            let needs_summary = def.cards.iter().any(|c| matches!(c.metric, Metric::Provided(_)));
            assert_eq!(needs_summary, def.summary_endpoint.is_some(), "{}", def.slug());
        }
    }

    #[test]
    fn test_find() {
        let def = find("dead-stock").unwrap();
        assert_eq!(def.list.default_sort.key, "StockValue");
        assert!(!def.list.default_sort.ascending);
        assert_eq!(def.requests().len(), 5);

        assert_eq!(
            find("nope").unwrap_err(),
            ReportViewError::UnknownReport("nope".into())
        );
    }

    #[test]
    fn test_dead_stock_export_columns() {
        let def = find("dead-stock").unwrap();
        let headers: Vec<&str> = def.list.columns.export_columns().map(|c| c.csv_header()).collect();
        assert_eq!(
            headers,
            vec![
                "SKU",
                "Title",
                "Brand",
                "Category",
                "Location",
                "Stock",
                "Value",
                "Last Sale",
                "Days Since Sale",
                "Age Bracket"
            ]
        );
    }
}
